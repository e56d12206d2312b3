use std::collections::BTreeSet;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use msgstyle_config::{format_timeout, Config, FilePreferences, PreferenceKey, PreferenceStore};
use msgstyle_core::{
    AppearanceMode, ContextKind, DisplayContext, FontDescriptor, FontWeight, MessageBody,
    Palette, SearchRanges, StyleId, TextStyle,
};
use msgstyle_tui::{ansi, measure, render_body, Theme};

#[derive(Parser)]
#[command(name = "msgstyle", about = "Render styled message bodies per display context", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a message body for a display context
    Render {
        /// Display context, e.g. message-bubble or quoted-reply
        context: ContextKind,
        /// JSON body file; reads stdin when omitted or "-"
        #[arg(short, long)]
        body: Option<PathBuf>,
        /// Appearance mode (light, dark); defaults to the configured mode
        #[arg(short, long)]
        mode: Option<AppearanceMode>,
        /// Render as an incoming bubble
        #[arg(long)]
        incoming: bool,
        /// Spoiler id to reveal (repeatable)
        #[arg(long = "reveal", value_name = "ID")]
        reveal: Vec<String>,
        /// Highlight matches of this query
        #[arg(long)]
        search: Option<String>,
        /// Base text style for contexts that take a font (body, body2, body-clamped, caption, headline)
        #[arg(long)]
        font: Option<TextStyle>,
        /// Use a bold base font
        #[arg(long)]
        bold: bool,
        /// Print the laid-out size instead of the styled text
        #[arg(long)]
        measure: bool,
    },
    /// Set the saved appearance mode, or toggle it when no mode is given
    Mode { mode: Option<AppearanceMode> },
    /// List display contexts
    Contexts,
    /// Show current configuration
    Config,
    /// Read or change privacy preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print one preference, or all of them
    Get { key: Option<PreferenceKey> },
    /// Set a preference to true or false
    Set {
        key: PreferenceKey,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Set the screen lock timeout in seconds
    Timeout { seconds: u64 },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("msgstyle=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)?;

    match cli.command {
        Commands::Render {
            context,
            body,
            mode,
            incoming,
            reveal,
            search,
            font,
            bold,
            measure: measure_only,
        } => {
            let body = read_body(body.as_deref())?;
            let palette = config.palette()?;
            let search = search.map(|query| {
                let matched = SearchRanges::for_query(body.text(), &query).matched;
                SearchRanges::with_palette(matched, &palette)
            });
            let font = match (font, bold) {
                (None, false) => None,
                (style, bold) => {
                    let font = FontDescriptor::new(style.unwrap_or(TextStyle::Body));
                    Some(if bold {
                        font.with_weight(FontWeight::Bold)
                    } else {
                        font
                    })
                }
            };
            let request = RenderRequest {
                incoming,
                revealed: reveal.into_iter().map(StyleId::from).collect(),
                search,
                font,
            };
            let mode = mode.unwrap_or(config.appearance.mode);
            let display =
                build_context(context, request, &palette, mode).resolve_with(&palette);

            if measure_only {
                let font = display.base_font();
                let (width, height) = measure(&body, font);
                let points = config.type_scale()?.font_size(&font);
                println!("{width}x{height} cells, {} at {points}pt", font.style);
            } else {
                let theme = Theme::new(mode, palette);
                let lines = render_body(&body, &display, &theme);
                ansi::print_lines(&mut std::io::stdout().lock(), &lines)?;
            }
        }
        Commands::Mode { mode } => {
            let mode = mode.unwrap_or_else(|| config.appearance.mode.toggled());
            Config::save_appearance(&config_path, mode)?;
            tracing::info!(%mode, "appearance mode saved");
        }
        Commands::Contexts => {
            for kind in ContextKind::ALL {
                println!("{:<40} {}", kind.name(), kind.description());
            }
        }
        Commands::Config => {
            println!("Config path: {}", config_path.display());
            println!("{}", toml::to_string_pretty(&config)?);
            let scale = config.type_scale()?;
            for style in TextStyle::ALL {
                println!("{:<14} {}pt", style.name(), scale.point_size(*style));
            }
        }
        Commands::Prefs { action } => {
            let mut prefs = FilePreferences::open(&config_path)?;
            run_prefs(&mut prefs, action)?;
        }
    }

    Ok(())
}

struct RenderRequest {
    incoming: bool,
    revealed: BTreeSet<StyleId>,
    search: Option<SearchRanges>,
    font: Option<FontDescriptor>,
}

/// Build the context for `kind`, dropping inputs it does not accept.
///
/// A fixed text color is taken from `palette` as resolved for `mode`.
fn build_context(
    kind: ContextKind,
    request: RenderRequest,
    palette: &Palette,
    mode: AppearanceMode,
) -> DisplayContext {
    if !kind.accepts_reveal_set() && !request.revealed.is_empty() {
        tracing::warn!(context = %kind, "context does not accept revealed spoiler ids; ignoring");
    }
    if !kind.accepts_search_ranges() && request.search.is_some() {
        tracing::warn!(context = %kind, "context does not accept search ranges; ignoring");
    }
    if !kind.accepts_font() && request.font.is_some() {
        tracing::warn!(context = %kind, "context does not accept a font; ignoring");
    }

    let font = request.font.unwrap_or_default();
    match kind {
        ContextKind::Measurement => DisplayContext::Measurement { font },
        ContextKind::UnstyledText => DisplayContext::UnstyledText {
            font,
            text_color: palette.primary_text.resolve(mode),
        },
        ContextKind::MessageBubble => DisplayContext::MessageBubble {
            is_incoming: request.incoming,
            revealed_spoiler_ids: request.revealed,
            search_ranges: request.search,
        },
        ContextKind::Composing => DisplayContext::Composing,
        ContextKind::ComposingAttachment => DisplayContext::ComposingAttachment,
        ContextKind::QuotedReply => DisplayContext::QuotedReply {
            font,
            text_color: palette.primary_text,
        },
        ContextKind::LongMessageView => DisplayContext::LongMessageView {
            revealed_spoiler_ids: request.revealed,
        },
        ContextKind::GroupStoryReply => DisplayContext::GroupStoryReply,
        ContextKind::ComposingGroupStoryReply => DisplayContext::ComposingGroupStoryReply,
        ContextKind::ConversationListSnippet => DisplayContext::ConversationListSnippet {
            font,
            text_color: palette.secondary_text_and_icon,
        },
        ContextKind::ConversationListSearchResultSnippet => {
            DisplayContext::ConversationListSearchResultSnippet
        }
        ContextKind::MediaCaption => DisplayContext::MediaCaption {
            revealed_spoiler_ids: request.revealed,
        },
    }
}

fn read_body(path: Option<&std::path::Path>) -> Result<MessageBody> {
    let json = match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read body file {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read body from stdin")?;
            buf
        }
    };
    if json.trim().is_empty() {
        bail!("Message body is empty");
    }
    MessageBody::from_json(&json).context("Failed to parse message body")
}

fn run_prefs(prefs: &mut dyn PreferenceStore, action: PrefsAction) -> Result<()> {
    match action {
        PrefsAction::Get { key: Some(key) } => println!("{}", prefs.get(key)),
        PrefsAction::Get { key: None } => {
            for key in PreferenceKey::ALL {
                println!("{:<20} {}", key.name(), prefs.get(*key));
            }
            println!(
                "{:<20} {}",
                "screen_lock_timeout",
                format_timeout(prefs.screen_lock_timeout(), true)
            );
        }
        PrefsAction::Set { key, value } => {
            prefs.set(key, value)?;
            tracing::info!(%key, value, "preference updated");
        }
        PrefsAction::Timeout { seconds } => {
            let timeout = std::time::Duration::from_secs(seconds);
            prefs.set_screen_lock_timeout(timeout)?;
            tracing::info!(timeout = %format_timeout(timeout, false), "screen lock timeout updated");
        }
    }
    Ok(())
}
