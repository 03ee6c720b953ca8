//! Client lifecycle against the live mock backend.
//!
//! Starts the mock server on a random port, then drives every build/parse
//! pair over real HTTP with ureq — the same request values the wasm executor
//! ships, minus the browser.

use api::{ApiClient, HttpMethod, HttpRequest, HttpResponse, NewRegister};

/// Execute an `HttpRequest` with ureq, returning non-2xx statuses as data so
/// the client's own status handling is what gets exercised.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get => {
            let mut call = agent.get(&req.url);
            for (name, value) in &req.headers {
                call = call.header(name.as_str(), value.as_str());
            }
            call.call()
        }
        HttpMethod::Post => {
            let mut call = agent.post(&req.url);
            for (name, value) in &req.headers {
                call = call.header(name.as_str(), value.as_str());
            }
            call.send(req.body.unwrap_or_default().as_bytes())
        }
    }
    .expect("HTTP transport error");

    HttpResponse {
        status: response.status().as_u16(),
        body: response.body_mut().read_to_string().unwrap_or_default(),
    }
}

fn spawn_backend() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn draft(specie_id: Option<i64>) -> NewRegister {
    NewRegister {
        title: "Old fig by the gate".to_string(),
        latitude: "-27.582346".to_string(),
        longitude: "-48.504342".to_string(),
        observations: "Aerial roots reach the wall".to_string(),
        specie_id,
    }
}

#[test]
fn register_lifecycle() {
    let client = ApiClient::new(&spawn_backend());

    // The map starts against an empty collection.
    let registers = client
        .parse_list_registers(execute(client.build_list_registers()))
        .unwrap();
    assert!(registers.is_empty());

    // The form's dropdown gets the seeded species.
    let species = client
        .parse_list_species(execute(client.build_list_species()))
        .unwrap();
    assert!(!species.is_empty());
    let chosen = &species[0];
    assert_eq!(chosen.scientific_name, "Ficus sp.");

    // Authenticated submit succeeds.
    let req = client
        .build_create_register(&draft(Some(chosen.id)), "token-1")
        .unwrap();
    client.parse_create_register(execute(req)).unwrap();

    // The new sighting shows up as a marker source, coordinates intact.
    let registers = client
        .parse_list_registers(execute(client.build_list_registers()))
        .unwrap();
    assert_eq!(registers.len(), 1);
    assert_eq!(registers[0].latitude, "-27.582346");
    assert_eq!(registers[0].specie.scientific_name, "Ficus sp.");
}

#[test]
fn submit_without_a_token_is_401() {
    let client = ApiClient::new(&spawn_backend());

    let species = client
        .parse_list_species(execute(client.build_list_species()))
        .unwrap();

    // Build the request, then strip the authorization header the way a
    // missing token context would.
    let mut req = client
        .build_create_register(&draft(Some(species[0].id)), "ignored")
        .unwrap();
    req.headers.retain(|(name, _)| name != "authorization");

    let err = client.parse_create_register(execute(req)).unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[test]
fn rejected_drafts_surface_their_status() {
    let client = ApiClient::new(&spawn_backend());

    // No specie selected: the backend refuses and the status reaches the
    // caller verbatim, ready for the alert text.
    let req = client.build_create_register(&draft(None), "token-1").unwrap();
    let err = client.parse_create_register(execute(req)).unwrap_err();
    assert_eq!(err.status(), Some(422));
}
