//! Line-oriented input driver.
//!
//! The binary has no graphical frontend of its own; interactions arrive as
//! plain commands on stdin, one per line, and are translated into the same
//! [`UiEvent`]s a real frontend would produce.  This keeps the whole core
//! drivable from a terminal or a pipe:
//!
//! ```text
//!   key space            press a key by name (space, n, p, +, -)
//!   click next           click an element by id
//!   search <term>        submit a search
//!   more tracks          reveal more results in a category
//!   open albums <source> click a result (resulttype + source id)
//!   page search [drop]   follow a page-switch affordance
//!   press volume         start a slider gesture
//!   drag volume 72.5     slider input change
//!   release volume       end a slider gesture
//!   hide / show          page visibility transitions
//!   quit
//! ```

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::app::{AppMessage, UiEvent};
use crate::arbiter::ControlKind;
use crate::surface::Category;

pub async fn run(
    msg_tx: mpsc::Sender<AppMessage>,
    visibility_tx: watch::Sender<bool>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            let _ = msg_tx.send(AppMessage::Quit).await;
            break;
        }

        match parse(line) {
            Some(Input::Ui(event)) => {
                if msg_tx.send(AppMessage::Ui(event)).await.is_err() {
                    break;
                }
            }
            Some(Input::Visibility { hidden }) => {
                debug!(hidden, "visibility change");
                if visibility_tx.send(hidden).is_err() {
                    break;
                }
            }
            None => warn!(line, "unrecognized input"),
        }
    }
    Ok(())
}

enum Input {
    Ui(UiEvent),
    Visibility { hidden: bool },
}

fn parse(line: &str) -> Option<Input> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let event = match verb {
        "key" if !rest.is_empty() => UiEvent::Key {
            key: rest.to_string(),
        },
        "click" if !rest.is_empty() => UiEvent::Click {
            target: rest.to_string(),
        },
        "search" => UiEvent::SubmitSearch {
            term: rest.to_string(),
        },
        "more" => UiEvent::ShowMore {
            container: category(rest)?.container_id().to_string(),
        },
        "open" => {
            let (value, source) = rest.split_once(char::is_whitespace)?;
            UiEvent::OpenResult {
                value: value.to_string(),
                source: source.trim().to_string(),
            }
        }
        "page" => {
            let mut parts = rest.split_whitespace();
            let value = parts.next()?.to_string();
            let delete_last = parts.next() == Some("drop");
            UiEvent::ShowPage { value, delete_last }
        }
        "press" => UiEvent::SliderPress {
            control: control(rest)?,
        },
        "drag" => {
            let (which, value) = rest.split_once(char::is_whitespace)?;
            UiEvent::SliderInput {
                control: control(which)?,
                value: value.trim().parse().ok()?,
            }
        }
        "release" => UiEvent::SliderRelease {
            control: control(rest)?,
        },
        "hide" => return Some(Input::Visibility { hidden: true }),
        "show" => return Some(Input::Visibility { hidden: false }),
        _ => return None,
    };
    Some(Input::Ui(event))
}

fn control(name: &str) -> Option<ControlKind> {
    match name {
        "volume" => Some(ControlKind::Volume),
        "position" => Some(ControlKind::Position),
        _ => None,
    }
}

fn category(name: &str) -> Option<Category> {
    Category::ALL.into_iter().find(|c| c.as_str() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui(line: &str) -> UiEvent {
        match parse(line) {
            Some(Input::Ui(event)) => event,
            _ => panic!("expected a UI event for {line:?}"),
        }
    }

    #[test]
    fn test_parse_key_and_click() {
        assert!(matches!(ui("key space"), UiEvent::Key { key } if key == "space"));
        assert!(matches!(ui("click next"), UiEvent::Click { target } if target == "next"));
    }

    #[test]
    fn test_parse_search_keeps_spaces() {
        match ui("search boards of canada") {
            UiEvent::SubmitSearch { term } => assert_eq!(term, "boards of canada"),
            other => panic!("unexpected event: {other:?}"),
        }
        // A bare "search" submits an empty term; the app no-ops it.
        assert!(matches!(ui("search"), UiEvent::SubmitSearch { term } if term.is_empty()));
    }

    #[test]
    fn test_parse_slider_gesture() {
        assert!(matches!(
            ui("press volume"),
            UiEvent::SliderPress {
                control: ControlKind::Volume
            }
        ));
        match ui("drag position 93.5") {
            UiEvent::SliderInput { control, value } => {
                assert_eq!(control, ControlKind::Position);
                assert_eq!(value, 93.5);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(
            ui("release position"),
            UiEvent::SliderRelease {
                control: ControlKind::Position
            }
        ));
    }

    #[test]
    fn test_parse_open_and_page() {
        match ui("open albums spotify:album:abc") {
            UiEvent::OpenResult { value, source } => {
                assert_eq!(value, "albums");
                assert_eq!(source, "spotify:album:abc");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        match ui("page search drop") {
            UiEvent::ShowPage { value, delete_last } => {
                assert_eq!(value, "search");
                assert!(delete_last);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_visibility_and_garbage() {
        assert!(matches!(
            parse("hide"),
            Some(Input::Visibility { hidden: true })
        ));
        assert!(matches!(
            parse("show"),
            Some(Input::Visibility { hidden: false })
        ));
        assert!(parse("frobnicate").is_none());
        assert!(parse("drag volume sideways").is_none());
    }

    #[test]
    fn test_parse_more_maps_category_to_container() {
        match ui("more tracks") {
            UiEvent::ShowMore { container } => assert_eq!(container, "tracks-search-results"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(parse("more podcasts").is_none());
    }
}
