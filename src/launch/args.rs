//! Startup command merging.

use super::START_COMMAND;

/// Append `args` to `cmd`, keeping [`START_COMMAND`] as the single first element.
///
/// - empty `cmd`: becomes `[start-dev, args..]`
/// - `cmd` already led by `start-dev`: `args` are appended
/// - anything else: `start-dev` is inserted in front, existing parts are kept,
///   then `args` are appended
pub fn merge_startup_args<I, S>(cmd: &mut Vec<String>, args: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    if cmd.first().map(String::as_str) != Some(START_COMMAND) {
        cmd.insert(0, START_COMMAND.to_string());
    }
    cmd.extend(args.into_iter().map(Into::into));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_gets_start_verb() {
        let mut cmd = Vec::new();
        merge_startup_args(&mut cmd, ["--import-realm"]);
        assert_eq!(cmd, strings(&["start-dev", "--import-realm"]));
    }

    #[test]
    fn start_verb_is_not_repeated() {
        let mut cmd = strings(&["start-dev", "--import-realm"]);
        merge_startup_args(&mut cmd, ["--http-relative-path=/auth"]);
        assert_eq!(
            cmd,
            strings(&["start-dev", "--import-realm", "--http-relative-path=/auth"])
        );
    }

    #[test]
    fn foreign_first_element_is_preserved_after_verb() {
        let mut cmd = strings(&["--health-enabled=false"]);
        merge_startup_args(&mut cmd, ["--import-realm"]);
        assert_eq!(
            cmd,
            strings(&["start-dev", "--health-enabled=false", "--import-realm"])
        );
    }

    #[test]
    fn no_args_only_normalizes() {
        let mut cmd = Vec::new();
        merge_startup_args(&mut cmd, std::iter::empty::<String>());
        assert_eq!(cmd, strings(&["start-dev"]));

        merge_startup_args(&mut cmd, std::iter::empty::<String>());
        assert_eq!(cmd, strings(&["start-dev"]));
    }

    #[test]
    fn duplicates_pass_through() {
        let mut cmd = Vec::new();
        merge_startup_args(&mut cmd, ["--import-realm"]);
        merge_startup_args(&mut cmd, ["--import-realm"]);
        assert_eq!(
            cmd,
            strings(&["start-dev", "--import-realm", "--import-realm"])
        );
    }
}
