use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::api::DEFAULT_API_BASE_URL;

pub mod account;
pub mod common;
pub mod evolution;
pub mod registry;

pub use account::*;
pub use common::*;
pub use evolution::*;
pub use registry::*;

#[derive(Debug, Parser)]
#[command(
    name = "ihub",
    version,
    about = "ihub - integration hub operator CLI"
)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Backend base URL, e.g. http://localhost:8101
    #[arg(
        long = "api-url",
        env = "IHUB_API_BASE_URL",
        default_value = DEFAULT_API_BASE_URL,
        global = true
    )]
    pub api_url: String,

    /// Session file (defaults to ~/.config/ihub/session.toml).
    #[arg(long = "session-file", env = "IHUB_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Enable debug logging for the CLI (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session token.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user and their capabilities.
    Whoami(WhoamiArgs),
    /// Owner (tenant) management.
    Owners {
        #[command(subcommand)]
        command: OwnerCommands,
    },
    /// Authentication profile management.
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Integration management.
    Integrations {
        #[command(subcommand)]
        command: IntegrationCommands,
    },
    /// Endpoint path management.
    Paths {
        #[command(subcommand)]
        command: PathCommands,
    },
    /// Request definition management.
    Requests {
        #[command(subcommand)]
        command: RequestCommands,
    },
    /// Evolution service management.
    Evolutions {
        #[command(subcommand)]
        command: EvolutionCommands,
    },
    /// Messaging instance management.
    Instances {
        #[command(subcommand)]
        command: InstanceCommands,
    },
    /// Permission management for the current user.
    Permissions {
        #[command(subcommand)]
        command: PermissionCommands,
    },
    /// Generate shell completions for the CLI.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ENV_LOCK;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse")
    }

    fn clear_env() {
        // SAFETY: Tests hold ENV_LOCK to serialize env mutations.
        unsafe {
            std::env::remove_var("IHUB_API_BASE_URL");
            std::env::remove_var("IHUB_SESSION_FILE");
            std::env::remove_var("IHUB_PASSWORD");
            std::env::remove_var("IHUB_EMAIL");
        }
    }

    #[test]
    fn globals_default_to_local_backend() {
        let _guard = ENV_LOCK.lock().expect("lock");
        clear_env();

        let cli = parse(&["ihub", "logout"]);
        assert_eq!(cli.globals.api_url, "http://localhost:8101");
        assert!(cli.globals.session_file.is_none());
        assert!(!cli.globals.verbose);
    }

    #[test]
    fn globals_read_environment() {
        let _guard = ENV_LOCK.lock().expect("lock");
        clear_env();
        // SAFETY: Tests hold ENV_LOCK to serialize env mutations.
        unsafe {
            std::env::set_var("IHUB_API_BASE_URL", "http://hub.internal:9000");
            std::env::set_var("IHUB_SESSION_FILE", "/tmp/ihub-session.toml");
        }

        let cli = parse(&["ihub", "owners", "list"]);
        assert_eq!(cli.globals.api_url, "http://hub.internal:9000");
        assert_eq!(
            cli.globals.session_file,
            Some(PathBuf::from("/tmp/ihub-session.toml"))
        );
        clear_env();
    }

    #[test]
    fn login_password_falls_back_to_env() {
        let _guard = ENV_LOCK.lock().expect("lock");
        clear_env();
        // SAFETY: Tests hold ENV_LOCK to serialize env mutations.
        unsafe {
            std::env::set_var("IHUB_PASSWORD", "from-env");
        }

        let cli = parse(&["ihub", "login", "--email", "ana@example.com"]);
        let Commands::Login(args) = cli.command else {
            panic!("expected login command");
        };
        assert_eq!(args.email, "ana@example.com");
        assert_eq!(args.password, "from-env");
        clear_env();
    }

    #[test]
    fn parses_scoped_auth_list() {
        let cli = parse(&["ihub", "auth", "list", "--owner-id", "3", "--json"]);
        match cli.command {
            Commands::Auth {
                command: AuthCommands::List(args),
            } => {
                assert_eq!(args.owner_id, Some(3));
                assert_eq!(args.output.mode(), OutputMode::Json);
            }
            _ => panic!("expected auth list command"),
        }
    }

    #[test]
    fn parses_auth_create_with_templated_headers() {
        let cli = parse(&[
            "ihub",
            "auth",
            "create",
            "--name",
            "crm",
            "--owner-id",
            "1",
            "--url",
            "https://crm.example.com/token",
            "--type",
            "api-key",
            "--header",
            "Authorization=Bearer ${accessToken}",
            "--body",
            "grant_type=client_credentials",
        ]);
        let Commands::Auth {
            command: AuthCommands::Create(args),
        } = cli.command
        else {
            panic!("expected auth create command");
        };
        assert_eq!(args.auth_type, AuthTypeArg::ApiKey);
        assert_eq!(args.content_type, ContentTypeArg::Json);
        assert_eq!(
            args.headers,
            vec![(
                "Authorization".to_string(),
                "Bearer ${accessToken}".to_string()
            )]
        );
        assert_eq!(args.body.len(), 1);
    }

    #[test]
    fn rejects_malformed_pairs_and_ids() {
        assert!(
            Cli::try_parse_from(["ihub", "integrations", "create", "--header", "novalue"]).is_err()
        );
        assert!(Cli::try_parse_from(["ihub", "owners", "show", "--id", "0"]).is_err());
        assert!(Cli::try_parse_from(["ihub", "owners", "show", "--id", "abc"]).is_err());
    }

    #[test]
    fn parses_request_test_and_list_filter() {
        let cli = parse(&["ihub", "requests", "test", "--id", "9", "--yaml"]);
        match cli.command {
            Commands::Requests {
                command: RequestCommands::Test(args),
            } => {
                assert_eq!(args.id, 9);
                assert_eq!(args.output.mode(), OutputMode::Yaml);
            }
            _ => panic!("expected requests test command"),
        }

        let cli = parse(&["ihub", "requests", "list", "--path-id", "4"]);
        match cli.command {
            Commands::Requests {
                command: RequestCommands::List(args),
            } => assert_eq!(args.path_id, Some(4)),
            _ => panic!("expected requests list command"),
        }
    }

    #[test]
    fn parses_instance_webhook() {
        let cli = parse(&[
            "ihub",
            "instances",
            "webhook",
            "--id",
            "5",
            "--url",
            "https://hooks.example.com/in",
        ]);
        match cli.command {
            Commands::Instances {
                command: InstanceCommands::Webhook(args),
            } => {
                assert_eq!(args.id, 5);
                assert_eq!(args.url, "https://hooks.example.com/in");
            }
            _ => panic!("expected instances webhook command"),
        }
    }

    #[test]
    fn parses_permission_set_with_delimiters() {
        let cli = parse(&[
            "ihub",
            "permissions",
            "set",
            "--permission",
            "api-manager,omnichannel",
            "--permission",
            "permission",
        ]);
        match cli.command {
            Commands::Permissions {
                command: PermissionCommands::Set(args),
            } => assert_eq!(
                args.permissions,
                vec!["api-manager", "omnichannel", "permission"]
            ),
            _ => panic!("expected permissions set command"),
        }
    }

    #[test]
    fn update_clear_flag_conflicts_with_replacements() {
        assert!(
            Cli::try_parse_from([
                "ihub",
                "integrations",
                "update",
                "--id",
                "1",
                "--header",
                "A=b",
                "--clear-headers",
            ])
            .is_err()
        );
    }
}
