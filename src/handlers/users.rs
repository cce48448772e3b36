use std::io::Write;

use tracing::debug;

use super::required;
use crate::dispatch::State;
use crate::domain::Command;
use crate::errors::GatorResult;
use crate::services::UserService;

pub fn login(state: &mut State<'_>, cmd: &Command) -> GatorResult<()> {
    let name = required(cmd, 0, "login <name>")?;

    let user = UserService::new(&state.store).find(name)?;
    state.config.set_user(&user.name)?;

    writeln!(state.out, "User {} has been set", user.name)?;
    Ok(())
}

pub fn register(state: &mut State<'_>, cmd: &Command) -> GatorResult<()> {
    let name = required(cmd, 0, "register <name>")?;

    let user = UserService::new(&state.store).register(name)?;
    state.config.set_user(&user.name)?;

    debug!(?user, "created user");
    writeln!(state.out, "User '{}' created successfully!", user.name)?;
    Ok(())
}

pub fn reset(state: &mut State<'_>, _cmd: &Command) -> GatorResult<()> {
    UserService::new(&state.store).reset()?;
    writeln!(state.out, "Database reset successfully.")?;
    Ok(())
}

pub fn users(state: &mut State<'_>, _cmd: &Command) -> GatorResult<()> {
    let users = UserService::new(&state.store).list()?;

    for user in users {
        if user.name == state.config.current_user_name {
            writeln!(state.out, "* {} (current)", user.name)?;
        } else {
            writeln!(state.out, "* {}", user.name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dispatch::state::tests::test_state;
    use crate::errors::GatorError;

    fn cmd(name: &str, args: &[&str]) -> Command {
        Command::new(name, args.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn test_register_then_login_succeeds() {
        let mut out = Vec::new();
        let (_dir, mut state) = test_state(&mut out);

        register(&mut state, &cmd("register", &["kahya"])).unwrap();
        state.config.set_user("").unwrap();
        login(&mut state, &cmd("login", &["kahya"])).unwrap();

        assert_eq!(state.config.current_user(), Some("kahya"));
        drop(state);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("User 'kahya' created successfully!"));
        assert!(output.contains("User kahya has been set"));
    }

    #[test]
    fn test_register_persists_current_user() {
        let mut out = Vec::new();
        let (_dir, mut state) = test_state(&mut out);

        register(&mut state, &cmd("register", &["lane"])).unwrap();

        let reloaded = Config::read_or_create(state.config.path()).unwrap();
        assert_eq!(reloaded.current_user(), Some("lane"));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut out = Vec::new();
        let (_dir, mut state) = test_state(&mut out);

        register(&mut state, &cmd("register", &["lane"])).unwrap();
        let result = register(&mut state, &cmd("register", &["lane"]));

        assert!(matches!(result, Err(GatorError::UserAlreadyExists(_))));
    }

    #[test]
    fn test_login_unknown_user_returns_error_and_keeps_config() {
        let mut out = Vec::new();
        let (_dir, mut state) = test_state(&mut out);
        register(&mut state, &cmd("register", &["lane"])).unwrap();

        let result = login(&mut state, &cmd("login", &["unknown"]));

        assert!(matches!(result, Err(GatorError::UserNotFound(n)) if n == "unknown"));
        assert_eq!(state.config.current_user(), Some("lane"));
    }

    #[test]
    fn test_missing_arguments() {
        let mut out = Vec::new();
        let (_dir, mut state) = test_state(&mut out);

        assert!(matches!(
            login(&mut state, &cmd("login", &[])),
            Err(GatorError::MissingArgument(_))
        ));
        assert!(matches!(
            register(&mut state, &cmd("register", &[])),
            Err(GatorError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_users_marks_current() {
        let mut out = Vec::new();
        let (_dir, mut state) = test_state(&mut out);
        register(&mut state, &cmd("register", &["kahya"])).unwrap();
        register(&mut state, &cmd("register", &["Allan"])).unwrap();
        register(&mut state, &cmd("register", &["bob"])).unwrap();
        login(&mut state, &cmd("login", &["kahya"])).unwrap();

        users(&mut state, &cmd("users", &[])).unwrap();
        drop(state);

        let output = String::from_utf8(out).unwrap();
        assert!(output.ends_with("* Allan\n* bob\n* kahya (current)\n"));
    }

    #[test]
    fn test_reset_removes_users() {
        let mut out = Vec::new();
        let (_dir, mut state) = test_state(&mut out);
        register(&mut state, &cmd("register", &["lane"])).unwrap();

        reset(&mut state, &cmd("reset", &[])).unwrap();

        assert!(UserService::new(&state.store).list().unwrap().is_empty());
    }
}
