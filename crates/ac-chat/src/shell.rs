//! Line-oriented chat shell.
//!
//! Free text goes to the [`DialogueRouter`]; lines starting with `:` are
//! sidebar commands. The shell is I/O-free: it returns [`ShellOutput`] and
//! the binary prints lines and writes charts.

use ac_protocol::FloatId;

use crate::config::ChatConfig;
use crate::replies;
use crate::router::{DialogueRouter, NamedChart};
use crate::session::Session;
use crate::sidebar::AddOutcome;

pub const COMMANDS_HELP: &str = "Commands: :add <id>, :view <id> [<id>...], :floats, \
:catalog, :map, :debug, :history, :quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text for the dialogue router.
    Chat(String),
    Add(Option<String>),
    View(Vec<String>),
    Floats,
    Catalog,
    Map,
    Debug,
    History,
    Quit,
    Unknown(String),
    /// Unbalanced quotes or a dangling escape.
    Invalid(String),
    Empty,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Chat(line.trim_end_matches(['\r', '\n']).to_string());
    };

    // Quote-aware splitting, no shell interpretation.
    let mut tokens = match shell_words::split(rest) {
        Ok(tokens) => tokens.into_iter(),
        Err(e) => return Command::Invalid(format!("failed to parse command: {e}")),
    };
    let name = tokens.next().unwrap_or_default();
    let args: Vec<String> = tokens.collect();
    match name.as_str() {
        "add" => Command::Add(args.into_iter().next()),
        "view" => Command::View(args),
        "floats" => Command::Floats,
        "catalog" => Command::Catalog,
        "map" => Command::Map,
        "debug" => Command::Debug,
        "history" => Command::History,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(name),
    }
}

/// What the shell produced for one input line.
#[derive(Debug, Default)]
pub struct ShellOutput {
    pub lines: Vec<String>,
    pub charts: Vec<NamedChart>,
    pub quit: bool,
}

impl ShellOutput {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            ..Self::default()
        }
    }
}

/// One interactive conversation.
pub struct Shell {
    router: DialogueRouter,
    session: Session,
    config: ChatConfig,
    debug: bool,
}

impl Shell {
    pub fn new(router: DialogueRouter, config: ChatConfig) -> Self {
        let debug = config.debug_intents;
        Self {
            router,
            session: Session::new(),
            config,
            debug,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub async fn handle_line(&mut self, line: &str) -> ShellOutput {
        match parse_command(line) {
            Command::Empty => ShellOutput::default(),
            Command::Chat(text) => self.chat(&text).await,
            Command::Add(arg) => self.add(arg.as_deref()).await,
            Command::View(args) => self.view(&args),
            Command::Floats => ShellOutput::line(replies::loaded_floats(&self.session.loaded_ids())),
            Command::Catalog => ShellOutput::line(format!(
                "Known floats: {}",
                join(&self.config.known_floats)
            )),
            Command::Map => match self.router.positions_map(&self.session) {
                Some(chart) => ShellOutput {
                    lines: vec!["Latest positions map rendered.".into()],
                    charts: vec![chart],
                    quit: false,
                },
                None => ShellOutput::line(replies::NO_FLOATS_LOADED),
            },
            Command::Debug => {
                self.debug = !self.debug;
                ShellOutput::line(if self.debug {
                    "Intent debug on."
                } else {
                    "Intent debug off."
                })
            }
            Command::History => ShellOutput {
                lines: self
                    .session
                    .transcript()
                    .iter()
                    .map(|m| format!("{}: {}", m.role, m.text))
                    .collect(),
                ..ShellOutput::default()
            },
            Command::Quit => ShellOutput {
                lines: vec![replies::GOODBYE.into()],
                quit: true,
                ..ShellOutput::default()
            },
            Command::Unknown(name) => {
                ShellOutput::line(format!("Unknown command ':{name}'. {COMMANDS_HELP}"))
            }
            Command::Invalid(reason) => ShellOutput::line(format!("{reason}. {COMMANDS_HELP}")),
        }
    }

    async fn chat(&mut self, text: &str) -> ShellOutput {
        let before = self.session.loaded_ids();
        let outcome = self.router.handle_turn(&mut self.session, text).await;

        let mut out = ShellOutput::default();
        if self.debug
            && let Some(interp) = &outcome.interpretation
        {
            match serde_json::to_string(interp) {
                Ok(json) => out.lines.push(format!("[debug] {json}")),
                Err(e) => tracing::warn!(error = %e, "failed to serialize interpretation"),
            }
        }
        out.lines.push(outcome.reply);
        out.charts = outcome.charts;
        self.push_map_if_changed(&before, &mut out);
        out
    }

    async fn add(&mut self, arg: Option<&str>) -> ShellOutput {
        let Some(arg) = arg else {
            return ShellOutput::line(format!(
                "Usage: :add <float number> (known: {})",
                join(&self.config.known_floats)
            ));
        };
        let Ok(float_id) = arg.parse::<FloatId>() else {
            return ShellOutput::line(replies::INVALID_FLOAT_NUMBER);
        };

        let before = self.session.loaded_ids();
        let mut out = match self.router.add_float(&mut self.session, float_id).await {
            Ok(AddOutcome::Added(id)) => ShellOutput::line(replies::float_loaded(id)),
            Ok(AddOutcome::AlreadyLoaded(id)) => {
                ShellOutput::line(format!("Float {id} is already loaded."))
            }
            Err(e) => {
                tracing::warn!(float_id = %float_id, error = %e, "sidebar add failed");
                ShellOutput::line(replies::fetch_failed(float_id))
            }
        };
        self.push_map_if_changed(&before, &mut out);
        out
    }

    fn view(&self, args: &[String]) -> ShellOutput {
        let mut ids = Vec::with_capacity(args.len());
        for arg in args {
            match arg.parse::<FloatId>() {
                Ok(id) => ids.push(id),
                Err(_) => return ShellOutput::line(replies::INVALID_FLOAT_NUMBER),
            }
        }
        if ids.is_empty() {
            return ShellOutput::line("Usage: :view <id> [<id>...]");
        }

        let charts = self.router.view_selection(&self.session, &ids);
        if charts.is_empty() {
            return ShellOutput::line(
                "None of the selected floats are loaded. Use :add <id> first.",
            );
        }
        ShellOutput {
            lines: vec![format!("Rendered {} chart(s).", charts.len())],
            charts,
            quit: false,
        }
    }

    fn push_map_if_changed(&self, before: &[FloatId], out: &mut ShellOutput) {
        if !self.config.show_positions_map || self.session.loaded_ids() == before {
            return;
        }
        if let Some(chart) = self.router.positions_map(&self.session) {
            out.charts.push(chart);
        }
    }
}

fn join(ids: &[FloatId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use ac_argo_data::MockFetcher;

    fn shell() -> Shell {
        let router = DialogueRouter::with_fetcher(Arc::new(MockFetcher::with_sample_floats()));
        Shell::new(router, ChatConfig::default())
    }

    fn keys(out: &ShellOutput) -> Vec<&str> {
        out.charts.iter().map(|c| c.key.as_str()).collect()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(
            parse_command("temperature 2903893"),
            Command::Chat("temperature 2903893".into())
        );
        assert_eq!(
            parse_command(":add 2903893"),
            Command::Add(Some("2903893".into()))
        );
        assert_eq!(parse_command(":add"), Command::Add(None));
        assert_eq!(
            parse_command(":view 1 2"),
            Command::View(vec!["1".into(), "2".into()])
        );
        assert_eq!(parse_command(" :quit "), Command::Quit);
        assert_eq!(parse_command(":nope"), Command::Unknown("nope".into()));
        assert_eq!(
            parse_command(":view \"2903893\" 6902746"),
            Command::View(vec!["2903893".into(), "6902746".into()])
        );
        assert!(matches!(parse_command(":view \"2903893"), Command::Invalid(_)));
        assert_eq!(parse_command(":"), Command::Unknown(String::new()));
    }

    #[test]
    fn chat_text_keeps_inner_spacing() {
        assert_eq!(
            parse_command("compare 1234567 vs 7654321\n"),
            Command::Chat("compare 1234567 vs 7654321".into())
        );
    }

    #[tokio::test]
    async fn chat_load_appends_positions_map() {
        let mut sh = shell();
        let out = sh.handle_line("temperature 2903893").await;
        assert_eq!(out.lines, vec!["Temperature profile for float 2903893 displayed."]);
        assert_eq!(keys(&out), vec!["profile-2903893-TEMP", "map-latest"]);

        // Nothing new loaded, no map.
        let out = sh.handle_line("salinity").await;
        assert_eq!(keys(&out), vec!["profile-2903893-PSAL"]);
    }

    #[tokio::test]
    async fn positions_map_can_be_disabled() {
        let router = DialogueRouter::with_fetcher(Arc::new(MockFetcher::with_sample_floats()));
        let config = ChatConfig {
            show_positions_map: false,
            ..ChatConfig::default()
        };
        let mut sh = Shell::new(router, config);
        let out = sh.handle_line(":add 2903893").await;
        assert!(out.charts.is_empty());
    }

    #[tokio::test]
    async fn add_command_flow() {
        let mut sh = shell();
        let out = sh.handle_line(":add 2903892").await;
        assert_eq!(out.lines, vec![replies::float_loaded(FloatId(2903892))]);
        assert_eq!(keys(&out), vec!["map-latest"]);

        let out = sh.handle_line(":add 2903892").await;
        assert_eq!(out.lines, vec!["Float 2903892 is already loaded."]);
        assert!(out.charts.is_empty());

        let out = sh.handle_line(":add 9999999").await;
        assert_eq!(out.lines, vec![replies::fetch_failed(FloatId(9999999))]);

        let out = sh.handle_line(":add abc").await;
        assert_eq!(out.lines, vec![replies::INVALID_FLOAT_NUMBER]);

        let out = sh.handle_line(":add").await;
        assert!(out.lines[0].contains("2903893, 2903892, 6902746"));

        // Sidebar actions stay out of the transcript.
        assert!(sh.session().transcript().is_empty());
    }

    #[tokio::test]
    async fn view_and_map_commands() {
        let mut sh = shell();
        assert_eq!(
            sh.handle_line(":map").await.lines,
            vec![replies::NO_FLOATS_LOADED]
        );
        sh.handle_line(":add 2903893").await;
        sh.handle_line(":add 6902746").await;

        let out = sh.handle_line(":view 2903893").await;
        assert_eq!(out.charts.len(), 3);
        let out = sh.handle_line(":view 2903893 6902746").await;
        assert_eq!(out.charts[0].key, "sidebar-compare-TEMP-2903893-6902746");
        let out = sh.handle_line(":view 2903892").await;
        assert!(out.charts.is_empty());

        let out = sh.handle_line(":map").await;
        assert_eq!(keys(&out), vec!["map-latest"]);
        assert_eq!(
            sh.handle_line(":floats").await.lines,
            vec!["Loaded floats: 2903893, 6902746"]
        );
    }

    #[tokio::test]
    async fn debug_toggle_prints_interpretation() {
        let mut sh = shell();
        assert!(!sh.debug());
        sh.handle_line(":debug").await;
        assert!(sh.debug());

        let out = sh.handle_line("where is 2903893").await;
        assert_eq!(out.lines.len(), 2);
        let json: serde_json::Value =
            serde_json::from_str(out.lines[0].trim_start_matches("[debug] ")).unwrap();
        assert_eq!(json["intent"], "trajectory");
        assert_eq!(json["float_ids"][0], 2903893);
        assert_eq!(json["matched"]["rule"], "trajectory");
    }

    #[tokio::test]
    async fn history_and_quit() {
        let mut sh = shell();
        sh.handle_line("hi").await;
        let out = sh.handle_line(":history").await;
        assert_eq!(
            out.lines,
            vec!["user: hi".to_string(), format!("assistant: {}", replies::GREETING)]
        );

        let out = sh.handle_line(":quit").await;
        assert!(out.quit);
    }

    #[tokio::test]
    async fn empty_line_does_nothing() {
        let mut sh = shell();
        let out = sh.handle_line("").await;
        assert!(out.lines.is_empty());
        assert!(sh.session().transcript().is_empty());
    }
}
