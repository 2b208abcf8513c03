use anyhow::Context;
use colored::Colorize;
use linkbio_core::{
    KeyValueStore, Linkbio, LinkbioConfig, MoveDirection, User, UserPatch,
};
use linkbio_types::{LinkId, LinkPatch, NewLink};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => LinkbioConfig::load(path)?,
        None => LinkbioConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), prefix = %config.key_prefix, "config resolved");

    let app = Linkbio::open(&config)
        .with_context(|| format!("opening data directory {}", config.data_dir.display()))?;
    let output = dispatch(&app, cli.command, &cli.format)?;
    println!("{output}");
    Ok(())
}

/// Execute one command and render its result.
pub fn dispatch<S: KeyValueStore>(
    app: &Linkbio<S>,
    command: Command,
    format: &OutputFormat,
) -> anyhow::Result<String> {
    match command {
        Command::Register(args) => {
            let user = app.sessions().register(&args.username, &args.email, &args.password)?;
            render_user(&user, format, &format!("{} Registered {}", "✓".green().bold(), user.username.bold()))
        }
        Command::Login(args) => {
            let user = app.sessions().login(&args.email, &args.password)?;
            render_user(&user, format, &format!("{} Logged in as {}", "✓".green().bold(), user.username.bold()))
        }
        Command::Logout => {
            app.sessions().logout()?;
            Ok(format!("{} Logged out", "✓".green()))
        }
        Command::Whoami => match app.sessions().current_session()? {
            Some(user) => render_user(&user, format, &format!("Logged in as {}", user.username.bold())),
            None => Ok(match format {
                OutputFormat::Json => "null".to_string(),
                OutputFormat::Text => "Not logged in.".to_string(),
            }),
        },
        Command::Profile(args) => cmd_profile(app, args.action, format),
        Command::Link(args) => cmd_link(app, args.action, format),
    }
}

fn cmd_profile<S: KeyValueStore>(
    app: &Linkbio<S>,
    action: ProfileAction,
    format: &OutputFormat,
) -> anyhow::Result<String> {
    match action {
        ProfileAction::Show { username } => {
            let user = app
                .profile(&username)?
                .with_context(|| format!("profile not found: {username}"))?;
            render_user(&user, format, "")
        }
        ProfileAction::Edit(args) => {
            let patch = UserPatch {
                display_name: args.display_name.map(|s| s.trim().to_string()),
                bio: args.bio.map(|s| s.trim().to_string()),
                profile_picture: args.picture,
                ..Default::default()
            };
            let user = app.sessions().update_current_user(patch)?;
            render_user(&user, format, &format!("{} Profile updated", "✓".green()))
        }
    }
}

fn cmd_link<S: KeyValueStore>(
    app: &Linkbio<S>,
    action: LinkAction,
    format: &OutputFormat,
) -> anyhow::Result<String> {
    let current = app.sessions().require_current()?;
    let links = app.links();
    let (user, headline) = match action {
        LinkAction::List => (current, String::new()),
        LinkAction::Add { title, url, icon } => {
            let mut link = NewLink::new(&title, &url)
                .map_err(linkbio_core::CoreError::InvalidLinkData)?;
            if let Some(icon) = icon {
                link = link.with_icon(icon);
            }
            let user = links.add_new_link(&current.id, link)?;
            (user, format!("{} Added {}", "✓".green(), title.trim().bold()))
        }
        LinkAction::Edit { id, title, url, icon } => {
            let link_id = parse_link_id(&id)?;
            let patch = LinkPatch { title, url, icon };
            let user = links.update_link(&current.id, &link_id, &patch)?;
            (user, format!("{} Updated link {}", "✓".green(), link_id.short_id().yellow()))
        }
        LinkAction::Delete { id } => {
            let link_id = parse_link_id(&id)?;
            let user = links.delete_link(&current.id, &link_id)?;
            (user, format!("{} Deleted link {}", "✓".green(), link_id.short_id().yellow()))
        }
        LinkAction::Reorder { ids } => {
            let ids = ids.iter().map(|id| parse_link_id(id)).collect::<anyhow::Result<Vec<_>>>()?;
            let dropped = current.links.iter().filter(|l| !ids.contains(&l.id)).count();
            let user = links.reorder_links(&current.id, &ids)?;
            let mut headline = format!("{} Reordered {} links", "✓".green(), user.links.len());
            if dropped > 0 {
                headline.push_str(&format!(" ({} removed)", dropped.to_string().red()));
            }
            (user, headline)
        }
        LinkAction::Move { id, direction } => {
            let link_id = parse_link_id(&id)?;
            let direction = match direction {
                Direction::Up => MoveDirection::Up,
                Direction::Down => MoveDirection::Down,
            };
            let user = links.move_link(&current.id, &link_id, direction)?;
            (user, format!("{} Moved link {}", "✓".green(), link_id.short_id().yellow()))
        }
    };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&user.sorted_links())?),
        OutputFormat::Text => {
            let mut out = headline;
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&render_links(&user));
            Ok(out)
        }
    }
}

fn parse_link_id(raw: &str) -> anyhow::Result<LinkId> {
    raw.parse::<LinkId>()
        .with_context(|| format!("not a link id: {raw}"))
}

fn render_user(user: &User, format: &OutputFormat, headline: &str) -> anyhow::Result<String> {
    if let OutputFormat::Json = format {
        return Ok(serde_json::to_string_pretty(user)?);
    }
    let mut out = String::new();
    if !headline.is_empty() {
        out.push_str(headline);
        out.push('\n');
    }
    out.push_str(&format!("{} (@{})\n", user.display_name.bold(), user.username.cyan()));
    if !user.bio.is_empty() {
        out.push_str(&format!("{}\n", user.bio));
    }
    out.push_str(&render_links(user));
    Ok(out)
}

fn render_links(user: &User) -> String {
    let sorted = user.sorted_links();
    if sorted.is_empty() {
        return "No links yet.".dimmed().to_string();
    }
    sorted
        .iter()
        .map(|link| {
            format!(
                "  {:>2}. {}  {}  {}",
                link.order,
                link.title.bold(),
                link.url.blue(),
                link.id.to_string().dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
