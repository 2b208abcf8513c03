use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "linkbio",
    about = "Linkbio — one page for all your links",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account and log in
    Register(RegisterArgs),
    /// Log in by email
    Login(LoginArgs),
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show or edit profiles
    Profile(ProfileArgs),
    /// Manage the logged-in user's links
    Link(LinkArgs),
}

#[derive(Args)]
pub struct RegisterArgs {
    pub username: String,
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Args)]
pub struct LoginArgs {
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show a public profile by username
    Show { username: String },
    /// Edit the logged-in user's profile
    Edit(ProfileEditArgs),
}

#[derive(Args)]
pub struct ProfileEditArgs {
    #[arg(long)]
    pub display_name: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    /// Profile picture URI (e.g. a data URI)
    #[arg(long)]
    pub picture: Option<String>,
}

#[derive(Args)]
pub struct LinkArgs {
    #[command(subcommand)]
    pub action: LinkAction,
}

#[derive(Subcommand)]
pub enum LinkAction {
    /// List links in display order
    List,
    /// Append a link
    Add {
        title: String,
        url: String,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Edit a link
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a link
    Delete { id: String },
    /// Rewrite the link order; links not listed are removed
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move a link one place up or down
    Move { id: String, direction: Direction },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_register() {
        let cli = Cli::try_parse_from(["linkbio", "register", "alice", "alice@x.com"]).unwrap();
        if let Command::Register(args) = cli.command {
            assert_eq!(args.username, "alice");
            assert_eq!(args.email, "alice@x.com");
            assert!(args.password.is_empty());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_login_with_password() {
        let cli = Cli::try_parse_from(["linkbio", "login", "a@x.com", "--password", "pw"]).unwrap();
        if let Command::Login(args) = cli.command {
            assert_eq!(args.password, "pw");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_logout() {
        let cli = Cli::try_parse_from(["linkbio", "logout"]).unwrap();
        assert!(matches!(cli.command, Command::Logout));
    }

    #[test]
    fn parse_profile_show() {
        let cli = Cli::try_parse_from(["linkbio", "profile", "show", "alice"]).unwrap();
        if let Command::Profile(args) = cli.command {
            assert!(matches!(args.action, ProfileAction::Show { ref username } if username == "alice"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_profile_edit() {
        let cli = Cli::try_parse_from(["linkbio", "profile", "edit", "--bio", "hi"]).unwrap();
        if let Command::Profile(ProfileArgs { action: ProfileAction::Edit(args) }) = cli.command {
            assert_eq!(args.bio, Some("hi".into()));
            assert!(args.display_name.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_link_add_with_icon() {
        let cli = Cli::try_parse_from([
            "linkbio", "link", "add", "GitHub", "github.com/alice", "--icon", "github",
        ])
        .unwrap();
        if let Command::Link(LinkArgs { action: LinkAction::Add { title, url, icon } }) = cli.command {
            assert_eq!(title, "GitHub");
            assert_eq!(url, "github.com/alice");
            assert_eq!(icon, Some("github".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_link_reorder_requires_ids() {
        assert!(Cli::try_parse_from(["linkbio", "link", "reorder"]).is_err());
        let cli = Cli::try_parse_from(["linkbio", "link", "reorder", "a", "b"]).unwrap();
        if let Command::Link(LinkArgs { action: LinkAction::Reorder { ids } }) = cli.command {
            assert_eq!(ids, vec!["a", "b"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_link_move() {
        let cli = Cli::try_parse_from(["linkbio", "link", "move", "abc", "down"]).unwrap();
        if let Command::Link(LinkArgs { action: LinkAction::Move { direction, .. } }) = cli.command {
            assert!(matches!(direction, Direction::Down));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "linkbio", "--format", "json", "--data-dir", "/tmp/lb", "-v", "whoami",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/lb")));
        assert!(cli.verbose);
    }
}
