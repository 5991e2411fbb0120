use linkharvest_core::{ConfigError, CoreError, Credentials};
use std::io::Write;

#[test]
fn test_inline_credentials_field_order() {
    let credentials =
        Credentials::from_cli_arg("my_id,my_secret,hunter2,spez,linkharvest/0.1 by spez").unwrap();
    assert_eq!(credentials.client_id, "my_id");
    assert_eq!(credentials.client_secret, "my_secret");
    assert_eq!(credentials.password, "hunter2");
    assert_eq!(credentials.username, "spez");
    assert_eq!(credentials.user_agent, "linkharvest/0.1 by spez");
}

#[test]
fn test_inline_credentials_trim_whitespace() {
    let credentials = Credentials::from_inline("id, secret, pw, user, agent").unwrap();
    assert_eq!(credentials.client_secret, "secret");
    assert_eq!(credentials.user_agent, "agent");
}

#[test]
fn test_inline_credentials_wrong_field_count() {
    let result = Credentials::from_inline("id,secret,pw");
    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::InvalidValue { .. }))
    ));
}

#[test]
fn test_inline_credentials_empty_field() {
    let result = Credentials::from_inline("id,,pw,user,agent");
    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::MissingField { ref field })) if field == "client_secret"
    ));
}

#[test]
fn test_yaml_credentials() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "client_id: my_id\nclient_secret: my_secret\nusername: spez\npassword: hunter2\nuser_agent: linkharvest/0.1 by spez"
    )
    .unwrap();

    let credentials = Credentials::from_yaml_file(file.path()).unwrap();
    assert_eq!(credentials.client_id, "my_id");
    assert_eq!(credentials.username, "spez");
    assert_eq!(credentials.password, "hunter2");
}

#[test]
fn test_yaml_credentials_missing_key() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "client_id: my_id\nclient_secret: my_secret").unwrap();

    let result = Credentials::from_yaml_file(file.path());
    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn test_yaml_credentials_file_not_found() {
    let result = Credentials::from_cli_arg("/nonexistent/creds.yaml");
    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::FileNotFound { .. }))
    ));
}

#[test]
fn test_cli_arg_dispatch() {
    // A comma anywhere means inline, no comma means file path.
    assert!(Credentials::from_cli_arg("a,b,c,d,e").is_ok());
    assert!(matches!(
        Credentials::from_cli_arg("creds.yaml"),
        Err(CoreError::Config(ConfigError::FileNotFound { .. }))
    ));
}
