//! Property tests for remote command quoting.

use proptest::prelude::*;

use bundle_sync::domain::value_objects::{shell_quote, RemoteCommand};

fn path() -> impl Strategy<Value = String> {
    proptest::string::string_regex("/[^\\x00]{0,40}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: in-memory hosts read back exactly the command that was built.
    #[test]
    fn property_commands_parse_back(from in path(), to in path()) {
        let commands = [
            RemoteCommand::Compare { existing: from.clone(), candidate: to.clone() },
            RemoteCommand::Move { from: from.clone(), to: to.clone() },
            RemoteCommand::Remove { path: from.clone() },
            RemoteCommand::Read { path: to.clone() },
        ];
        for command in commands {
            prop_assert_eq!(RemoteCommand::parse(&command.to_shell()), Some(command));
        }
    }
}

#[cfg(unix)]
proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a quoted word reaches the shell as exactly one argument.
    #[test]
    fn property_shell_quote_survives_sh(word in "[^\\x00]{0,40}") {
        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("printf %s {}", shell_quote(&word)))
            .output()
            .unwrap();
        prop_assert!(output.status.success());
        prop_assert_eq!(String::from_utf8_lossy(&output.stdout).into_owned(), word);
    }
}
