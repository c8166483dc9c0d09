use client::{ClientConfig, Session, SessionError};

fn run(session: &mut Session, script: &[&str]) -> Vec<String> {
    script
        .iter()
        .map(|line| session.execute_line(line).unwrap())
        .collect()
}

#[test]
fn test_scripted_session() {
    let config = ClientConfig::from_toml_str("[display]\nzone = \"utc\"\n").unwrap();
    let mut session = Session::new(config.display);

    let outputs = run(
        &mut session,
        &[
            "create main",
            "commit initial import",
            "commit add parser",
            "commit fix parser",
            "drop 1",
            "head",
            "size",
        ],
    );

    assert_eq!(outputs[0], "Created repository main");
    assert_eq!(outputs[1], "New commit: 0");
    assert_eq!(outputs[4], "Dropped 1");
    assert_eq!(outputs[5], "2");
    assert_eq!(outputs[6], "2");

    let history = session.execute_line("history 10").unwrap();
    let messages: Vec<&str> = history
        .lines()
        .map(|line| line.rsplit(": ").next().unwrap())
        .collect();
    assert_eq!(messages, vec!["fix parser", "initial import"]);
    assert!(history.contains(" UTC: "));
}

#[test]
fn test_merge_feature_repository() {
    let mut session = Session::default();

    run(
        &mut session,
        &[
            "create feature",
            "commit feature work",
            "create main",
            "commit release",
            "synchronize feature",
        ],
    );

    assert_eq!(session.execute_line("size").unwrap(), "2");
    assert_eq!(session.execute_line("contains 0").unwrap(), "true");

    session.execute_line("switch feature").unwrap();
    assert_eq!(session.execute_line("show").unwrap(), "feature - No commits");
}

#[test]
fn test_errors_do_not_change_state() {
    let mut session = Session::default();
    session.execute_line("create main").unwrap();
    session.execute_line("commit one").unwrap();

    assert!(matches!(
        session.execute_line("history 0"),
        Err(SessionError::History(_))
    ));
    assert!(session.execute_line("bogus").is_err());
    assert!(session.execute_line("create main").is_err());

    assert_eq!(session.execute_line("size").unwrap(), "1");
    assert_eq!(session.execute_line("head").unwrap(), "0");
}
