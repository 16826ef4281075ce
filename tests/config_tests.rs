use opentok_rooms::config::DirectoryBackend;
use opentok_rooms::{Config, Role};

const CREDENTIALS: &str = r#"
[credentials]
api_key = "12345"
secret = "test-secret"
"#;

#[test]
fn test_defaults_with_credentials_only() {
    let cfg = Config::from_toml(CREDENTIALS).unwrap();

    assert_eq!(cfg.credentials.api_key, "12345");
    assert_eq!(cfg.service.http.port, 3000);
    assert_eq!(cfg.platform.api_url, "https://api.opentok.com");
    assert_eq!(cfg.platform.request_timeout_secs, 10);
    assert_eq!(cfg.directory.backend, DirectoryBackend::Memory);
    assert_eq!(cfg.tokens.room_role, Role::Publisher);
    assert_eq!(cfg.tokens.expire_secs, 86400);
    assert_eq!(cfg.captions.language_code, "en-US");
    assert_eq!(cfg.captions.max_duration_secs, 36000);
    assert!(cfg.captions.partial_captions);
    assert_eq!(cfg.render.resolution, "1280x720");
}

#[test]
fn test_missing_credentials_are_fatal() {
    let err = Config::from_toml("[service]\nname = \"rooms\"").unwrap_err();
    assert!(err.to_string().contains("TOKBOX_API_KEY"));

    let err = Config::from_toml("[credentials]\napi_key = \"12345\"\nsecret = \"\"").unwrap_err();
    assert!(err.to_string().contains("TOKBOX_SECRET"));
}

#[test]
fn test_custom_sections() {
    let toml = format!(
        r#"{CREDENTIALS}
[service.http]
bind = "127.0.0.1"
port = 8080

[directory]
backend = "file"
path = "/var/lib/rooms.json"

[tokens]
room_role = "moderator"
expire_secs = 3600
"#
    );

    let cfg = Config::from_toml(&toml).unwrap();

    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 8080);
    assert_eq!(cfg.directory.backend, DirectoryBackend::File);
    assert_eq!(cfg.directory.path, "/var/lib/rooms.json");
    assert_eq!(cfg.tokens.room_role, Role::Moderator);
    assert_eq!(cfg.tokens.expire_secs, 3600);
}

#[test]
fn test_unknown_role_rejected() {
    let toml = format!("{CREDENTIALS}\n[tokens]\nroom_role = \"admin\"\n");

    assert!(Config::from_toml(&toml).is_err());
}

#[test]
fn test_zero_timeout_rejected() {
    let toml = format!("{CREDENTIALS}\n[platform]\nrequest_timeout_secs = 0\n");

    assert!(Config::from_toml(&toml).is_err());
}

#[test]
fn test_token_expiry_out_of_range_rejected() {
    for expire_secs in [0u64, 99_999_999] {
        let toml = format!("{CREDENTIALS}\n[tokens]\nexpire_secs = {expire_secs}\n");

        let err = Config::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("tokens.expire_secs"));
    }

    let longest = format!("{CREDENTIALS}\n[tokens]\nexpire_secs = 2592000\n");
    assert_eq!(Config::from_toml(&longest).unwrap().tokens.expire_secs, 2_592_000);
}

#[test]
fn test_zero_project_token_ttl_rejected() {
    let toml = format!("{CREDENTIALS}\n[platform]\nproject_token_ttl_secs = 0\n");

    assert!(Config::from_toml(&toml).is_err());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rooms.toml");
    std::fs::write(&path, format!("{CREDENTIALS}\n[service.http]\nport = 4000\n")).unwrap();

    let cfg = Config::load(path.to_str().unwrap()).unwrap();

    assert_eq!(cfg.service.http.port, 4000);
}
