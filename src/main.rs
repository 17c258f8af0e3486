use ilex::cli;

fn main() {
    if let Err(e) = cli::run() {
        // Lexing failures have already been rendered as diagnostics.
        if e.to_string().contains("lexing failed") {
            std::process::exit(1);
        }
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ilex::cli::{Command, IlexCli};

    #[test]
    fn tokens_command_honors_json_flag() {
        let cli = IlexCli::parse_from(["ilex", "tokens", "input.txt", "--json"]);
        match cli.command() {
            Command::Tokens { path, json } => {
                assert_eq!(path.to_string_lossy(), "input.txt");
                assert!(*json);
            }
            other => panic!("expected tokens command, got {other:?}"),
        }
    }

    #[test]
    fn check_command_accepts_global_flags_after_path() {
        let cli = IlexCli::parse_from(["ilex", "check", "data/input.txt", "--hex", "--verbose"]);
        match cli.command() {
            Command::Check { path } => assert_eq!(path.to_string_lossy(), "data/input.txt"),
            other => panic!("expected check command, got {other:?}"),
        }
    }
}
