use coherence_router::{
    Action, Capability, CapabilityRegistry, ConfigError, HttpMethod, PathKey, RouteOptions, RouteOrderingError,
    RoutePaths, RouterDefinition, RoutingMode,
    models::ResolvedRoute,
};

// --- Test Utilities ---

fn summary(routes: &[ResolvedRoute]) -> Vec<(HttpMethod, &str, Capability, Action)> {
    routes
        .iter()
        .map(|r| (r.method, r.path.as_str(), r.capability, r.action))
        .collect()
}

fn build(registry: &CapabilityRegistry, mode: RoutingMode) -> Vec<ResolvedRoute> {
    RouterDefinition::new(registry)
        .build_routes(mode, &RouteOptions::default())
        .expect("fresh definition never fails")
}

fn sessions_and_registrations() -> CapabilityRegistry {
    CapabilityRegistry::new()
        .enable(Capability::Authenticatable, [Action::New, Action::Create])
        .enable(Capability::Registerable, [Action::New, Action::Create])
}

// --- Tests ---

#[test]
fn test_public_scenario_sessions_and_registrations() {
    let registry = sessions_and_registrations();
    let routes = build(&registry, RoutingMode::Public);

    assert_eq!(
        summary(&routes),
        vec![
            (HttpMethod::Post, "/sessions", Capability::Authenticatable, Action::Create),
            (HttpMethod::Get, "/registrations/new", Capability::Registerable, Action::New),
            (HttpMethod::Post, "/registrations", Capability::Registerable, Action::Create),
        ]
    );
    assert_eq!(routes[0].handler.to_string(), "session#create");
}

#[test]
fn test_default_mode_is_public() {
    let registry = CapabilityRegistry::all();
    assert_eq!(RoutingMode::default(), RoutingMode::Public);
    assert_eq!(
        build(&registry, RoutingMode::default()),
        build(&registry, RoutingMode::Public)
    );
}

#[test]
fn test_empty_registry_emits_nothing() {
    let registry = CapabilityRegistry::new();
    for mode in [RoutingMode::Public, RoutingMode::Protected, RoutingMode::All] {
        assert!(build(&registry, mode).is_empty(), "mode {mode} should be empty");
    }
}

#[test]
fn test_full_registry_table() {
    let registry = CapabilityRegistry::all();

    let public = build(&registry, RoutingMode::Public);
    let lines: Vec<String> = public.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "POST /sessions -> session#create",
            "GET /registrations/new -> registration#new",
            "POST /registrations -> registration#create",
            "GET /passwords/new -> password#new",
            "POST /passwords -> password#create",
            "GET /passwords/{id}/edit -> password#edit",
            "PUT /passwords/{id} -> password#update",
            "PATCH /passwords/{id} -> password#update",
            "GET /confirmations/new -> confirmation#new",
            "POST /confirmations -> confirmation#create",
            "GET /confirmations/{id}/edit -> confirmation#edit",
            "GET /unlocks/new -> unlock#new",
            "POST /unlocks -> unlock#create",
            "GET /unlocks/{id}/edit -> unlock#edit",
            "GET /invitations/{id}/edit -> invitation#edit",
            "POST /invitations/create -> invitation#create_user",
        ]
    );

    let protected = build(&registry, RoutingMode::Protected);
    let lines: Vec<String> = protected.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "GET /invitations/new -> invitation#new",
            "POST /invitations -> invitation#create",
            "GET /invitations/{id}/resend -> invitation#resend",
            "DELETE /sessions -> session#delete",
            "GET /registrations -> registration#show",
            "PUT /registrations -> registration#update",
            "PATCH /registrations -> registration#update",
            "GET /registrations/edit -> registration#edit",
            "DELETE /registrations -> registration#delete",
        ]
    );
}

#[test]
fn test_disabled_pairs_never_emitted() {
    // Every capability enabled for a single action: only that action may appear.
    for enabled in Action::ALL {
        let registry = Capability::ALL
            .into_iter()
            .fold(CapabilityRegistry::new(), |registry, capability| {
                registry.enable(capability, [enabled])
            });
        for mode in [RoutingMode::Public, RoutingMode::Protected, RoutingMode::All] {
            for route in build(&registry, mode) {
                assert_eq!(route.action, enabled, "unexpected route {route}");
            }
        }
    }
}

#[test]
fn test_enabled_pairs_emitted_once_per_method() {
    let registry = CapabilityRegistry::all();
    let routes = build(&registry, RoutingMode::All);

    for (i, a) in routes.iter().enumerate() {
        for b in &routes[i + 1..] {
            assert!(
                !(a.capability == b.capability && a.action == b.action && a.method == b.method),
                "duplicate route for {a}"
            );
        }
    }

    // Enabling a single pair yields its routes and nothing else.
    let registry = CapabilityRegistry::new().enable(Capability::Recoverable, [Action::Update]);
    let routes = build(&registry, RoutingMode::All);
    assert_eq!(
        summary(&routes),
        vec![
            (HttpMethod::Put, "/passwords/{id}", Capability::Recoverable, Action::Update),
            (HttpMethod::Patch, "/passwords/{id}", Capability::Recoverable, Action::Update),
        ]
    );
}

#[test]
fn test_all_is_public_then_protected() {
    let registries = [
        CapabilityRegistry::all(),
        sessions_and_registrations(),
        CapabilityRegistry::new()
            .enable_all(Capability::Invitable)
            .enable(Capability::Authenticatable, [Action::Create, Action::Delete]),
    ];

    for registry in &registries {
        let mut expected = build(registry, RoutingMode::Public);
        expected.extend(build(registry, RoutingMode::Protected));
        assert_eq!(build(registry, RoutingMode::All), expected);
    }
}

#[test]
fn test_shared_path_keeps_each_method() {
    let registry = CapabilityRegistry::new().enable_all(Capability::Authenticatable);
    let routes = build(&registry, RoutingMode::All);

    assert_eq!(
        summary(&routes),
        vec![
            (HttpMethod::Post, "/sessions", Capability::Authenticatable, Action::Create),
            (HttpMethod::Delete, "/sessions", Capability::Authenticatable, Action::Delete),
        ]
    );
}

// --- Ordering Invariant ---

#[test]
fn test_public_after_protected_fails() {
    let registry = CapabilityRegistry::all();
    let opts = RouteOptions::default();
    let mut definition = RouterDefinition::new(&registry);

    assert!(definition.build_routes(RoutingMode::Protected, &opts).is_ok());
    assert!(definition.protected_built());
    assert_eq!(
        definition.build_routes(RoutingMode::Public, &opts),
        Err(RouteOrderingError)
    );
}

#[test]
fn test_public_after_all_fails() {
    let registry = CapabilityRegistry::new();
    let opts = RouteOptions::default();
    let mut definition = RouterDefinition::new(&registry);

    assert!(definition.build_routes(RoutingMode::All, &opts).is_ok());
    assert_eq!(
        definition.build_routes(RoutingMode::Public, &opts),
        Err(RouteOrderingError)
    );
    // Protected builds stay allowed after the flag is set.
    assert!(definition.build_routes(RoutingMode::Protected, &opts).is_ok());
}

#[test]
fn test_public_then_protected_succeeds() {
    let registry = CapabilityRegistry::all();
    let opts = RouteOptions::default();
    let mut definition = RouterDefinition::new(&registry);

    assert!(definition.build_routes(RoutingMode::Public, &opts).is_ok());
    assert!(definition.build_routes(RoutingMode::Public, &opts).is_ok());
    assert!(!definition.protected_built());
    assert!(definition.build_routes(RoutingMode::Protected, &opts).is_ok());
}

#[test]
fn test_new_definition_resets_ordering() {
    let registry = CapabilityRegistry::all();
    let opts = RouteOptions::default();

    let mut first = RouterDefinition::new(&registry);
    first.build_routes(RoutingMode::All, &opts).unwrap();
    assert!(first.build_routes(RoutingMode::Public, &opts).is_err());

    let mut second = RouterDefinition::new(&registry);
    assert!(second.build_routes(RoutingMode::Public, &opts).is_ok());
}

#[test]
fn test_ordering_error_message() {
    let message = RouteOrderingError.to_string();
    assert!(message.contains("public routes"));
    assert!(message.contains("first"));
}

// --- Path Overrides ---

#[test]
fn test_custom_sessions_path() {
    let registry = CapabilityRegistry::all();
    let opts = RouteOptions::new().custom_route(PathKey::Sessions, "/my-sessions");
    let mut definition = RouterDefinition::new(&registry);
    let routes = definition.build_routes(RoutingMode::All, &opts).unwrap();

    for route in &routes {
        if route.capability == Capability::Authenticatable {
            assert_eq!(route.path, "/my-sessions");
        }
    }
    let defaults = build(&registry, RoutingMode::All);
    for (custom, default) in routes.iter().zip(&defaults) {
        if custom.capability != Capability::Authenticatable {
            assert_eq!(custom.path, default.path);
        }
    }
    assert_eq!(routes.len(), defaults.len());
}

#[test]
fn test_custom_resource_base_keeps_member_suffix() {
    let registry = CapabilityRegistry::new().enable_all(Capability::Recoverable);
    let opts = RouteOptions::new().custom_route(PathKey::Passwords, "/account/password/");
    let routes = RouterDefinition::new(&registry)
        .build_routes(RoutingMode::Public, &opts)
        .unwrap();
    let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();

    assert_eq!(
        paths,
        vec![
            "/account/password/new",
            "/account/password/",
            "/account/password/{id}/edit",
            "/account/password/{id}",
            "/account/password/{id}",
        ]
    );
}

#[test]
fn test_call_overrides_win_over_definition_defaults() {
    let registry = CapabilityRegistry::new()
        .enable_all(Capability::Authenticatable)
        .enable_all(Capability::Registerable);
    let defaults = RoutePaths::default()
        .with(PathKey::Sessions, "/login")
        .with(PathKey::Registrations, "/signup");
    let mut definition = RouterDefinition::with_paths(&registry, defaults);

    let opts = RouteOptions::new().custom_route(PathKey::Sessions, "/auth");
    let routes = definition.build_routes(RoutingMode::Public, &opts).unwrap();
    assert_eq!(
        summary(&routes),
        vec![
            (HttpMethod::Post, "/auth", Capability::Authenticatable, Action::Create),
            (HttpMethod::Get, "/registrations/new", Capability::Registerable, Action::New),
            (HttpMethod::Post, "/signup", Capability::Registerable, Action::Create),
        ]
    );

    // Overrides are per call: the next build is back on the definition defaults.
    let routes = definition
        .build_routes(RoutingMode::Protected, &RouteOptions::default())
        .unwrap();
    assert_eq!(routes[0].path, "/login");
}

#[test]
fn test_route_paths_validation() {
    assert!(RoutePaths::default().validate().is_ok());
    assert!(
        RoutePaths::default()
            .with(PathKey::Sessions, "/login")
            .with(PathKey::Passwords, "/account/password")
            .validate()
            .is_ok()
    );

    // Both unlock and confirmation resources on one base collide on GET .../new.
    let err = RoutePaths::default()
        .with(PathKey::Unlocks, "/confirmations")
        .validate()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidRoute { key: PathKey::Unlocks, ref path } if path == "/confirmations/new"
    ));

    let err = RoutePaths::default()
        .with(PathKey::InvitationsResend, "invitations/{id}/resend")
        .validate()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidRoute { key: PathKey::InvitationsResend, .. }
    ));
}

// --- Optional Arguments ---

#[test]
fn test_coherence_routes_without_arguments_is_public() {
    let registry = CapabilityRegistry::all();
    let mut definition = RouterDefinition::new(&registry);
    let routes = definition.coherence_routes(None, None).unwrap();

    assert_eq!(routes, build(&registry, RoutingMode::Public));
    assert!(!definition.protected_built());
}

#[test]
fn test_coherence_routes_with_mode_or_options_only() {
    let registry = CapabilityRegistry::new().enable_all(Capability::Authenticatable);
    let opts = RouteOptions::new().custom_route(PathKey::Sessions, "/my-sessions");
    let mut definition = RouterDefinition::new(&registry);

    let public = definition.coherence_routes(None, Some(&opts)).unwrap();
    assert_eq!(
        summary(&public),
        vec![(HttpMethod::Post, "/my-sessions", Capability::Authenticatable, Action::Create)]
    );

    let protected = definition
        .coherence_routes(Some(RoutingMode::Protected), None)
        .unwrap();
    assert_eq!(
        summary(&protected),
        vec![(HttpMethod::Delete, "/sessions", Capability::Authenticatable, Action::Delete)]
    );

    // Omitting the mode still means public, so the ordering rule applies.
    assert_eq!(definition.coherence_routes(None, None), Err(RouteOrderingError));
}

// --- Deprecated Mode ---

#[test]
#[allow(deprecated)]
fn test_private_matches_protected_with_one_warning() {
    let registry = CapabilityRegistry::all();
    let opts = RouteOptions::default();

    let mut definition = RouterDefinition::new(&registry);
    let private = definition.build_routes(RoutingMode::Private, &opts).unwrap();
    assert_eq!(definition.warnings().len(), 1);
    assert!(definition.warnings()[0].contains("deprecated"));
    assert!(definition.protected_built());

    assert_eq!(private, build(&registry, RoutingMode::Protected));

    let mut definition = RouterDefinition::new(&registry);
    definition.build_routes(RoutingMode::Protected, &opts).unwrap();
    assert!(definition.warnings().is_empty());
}

#[test]
#[allow(deprecated)]
fn test_routing_mode_parsing() {
    assert_eq!("public".parse::<RoutingMode>(), Ok(RoutingMode::Public));
    assert_eq!(":protected".parse::<RoutingMode>(), Ok(RoutingMode::Protected));
    assert_eq!("all".parse::<RoutingMode>(), Ok(RoutingMode::All));
    assert_eq!(":private".parse::<RoutingMode>(), Ok(RoutingMode::Private));
    assert!("admin".parse::<RoutingMode>().is_err());
}
