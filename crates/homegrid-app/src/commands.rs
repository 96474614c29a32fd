//! Console commands driving a [`Launcher`].

use anyhow::{Context, Result, bail};

use homegrid_core::app::AppEntry;
use homegrid_core::drag::DragOutcome;
use homegrid_core::filter::LibraryView;
use homegrid_core::input::DragEvent;
use homegrid_core::launcher::Launcher;
use homegrid_core::placement::SequenceId;

pub const HELP: &str = "\
commands:
  dock                         show the dock
  home [page]                  show a home page (current page by default)
  next | prev                  change home page
  move <dock|home> <from> <to> move an app within a grid
  drag <dock|home> <index> <dx> [dy]
                               simulate a drag gesture (home index is page-relative)
  search <text>                filter the library
  clear                        clear the library search
  library                      show the library
  swipe <dy>                   swipe on the home screen (negative is up)
  launch <package>             launch an app
  save                         save the layout
  export                       print the layout as JSON
  refresh                      re-enumerate installed apps in the background
  quit";

/// What a command produced.
#[derive(Debug, PartialEq)]
pub enum CommandOutput {
    Text(Vec<String>),
    None,
    Quit,
}

fn parse_index(arg: Option<&str>, what: &str) -> Result<usize> {
    let arg = arg.with_context(|| format!("missing {what}"))?;
    arg.parse()
        .with_context(|| format!("{what} must be a non-negative integer, got {arg:?}"))
}

fn parse_offset(arg: Option<&str>, what: &str) -> Result<f32> {
    match arg {
        Some(s) => s
            .parse()
            .with_context(|| format!("{what} must be a number, got {s:?}")),
        None => Ok(0.0),
    }
}

fn parse_sequence(arg: Option<&str>) -> Result<SequenceId> {
    let arg = arg.context("missing grid (dock or home)")?;
    Ok(arg.parse()?)
}

fn numbered(apps: &[AppEntry]) -> Vec<String> {
    apps.iter()
        .enumerate()
        .map(|(i, a)| format!("{i:>3}  {:<20} {}", a.label, a.package))
        .collect()
}

fn render_library(view: &LibraryView<'_>) -> Vec<String> {
    match view {
        LibraryView::Categorized(buckets) => {
            let mut lines = Vec::new();
            for bucket in buckets {
                lines.push(format!("{} ({})", bucket.category, bucket.len()));
                for app in bucket.visible() {
                    lines.push(format!("    {}", app.label));
                }
                if bucket.has_more() {
                    lines.push(format!("    See All (+{})", bucket.overflow()));
                }
            }
            lines
        },
        LibraryView::Flat(apps) => apps.iter().map(|a| a.label.clone()).collect(),
        LibraryView::NoMatches => vec!["No apps found".to_string()],
    }
}

fn describe_drag(outcome: DragOutcome) -> Vec<String> {
    let line = match outcome {
        DragOutcome::Moved(intent) => format!("moved {} -> {}", intent.from, intent.to),
        DragOutcome::Unchanged => "no move".to_string(),
        DragOutcome::Cancelled => "drag cancelled".to_string(),
        DragOutcome::Pending => "drag ignored".to_string(),
    };
    vec![line]
}

/// Parse and execute one command line.
pub fn execute(line: &str, launcher: &mut Launcher) -> Result<CommandOutput> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(CommandOutput::None);
    };

    let output = match name {
        "help" => CommandOutput::Text(HELP.lines().map(str::to_string).collect()),
        "dock" => CommandOutput::Text(numbered(launcher.store().dock())),
        "home" => {
            if let Some(arg) = parts.next() {
                let page = parse_index(Some(arg), "page")?;
                if page >= launcher.page_count() {
                    bail!("page {page} out of range (have {})", launcher.page_count());
                }
                launcher.set_page(page);
            }
            let mut lines = vec![format!(
                "page {}/{}",
                launcher.page() + 1,
                launcher.page_count()
            )];
            lines.extend(numbered(launcher.current_page_apps()));
            CommandOutput::Text(lines)
        },
        "next" | "prev" => {
            let changed = if name == "next" {
                launcher.next_page()
            } else {
                launcher.prev_page()
            };
            if !changed {
                bail!("no {name} page");
            }
            CommandOutput::Text(vec![format!(
                "page {}/{}",
                launcher.page() + 1,
                launcher.page_count()
            )])
        },
        "move" => {
            let id = parse_sequence(parts.next())?;
            let from = parse_index(parts.next(), "from")?;
            let to = parse_index(parts.next(), "to")?;
            if launcher.move_app(id, from, to) {
                CommandOutput::Text(vec![format!("moved {id} {from} -> {to}")])
            } else {
                CommandOutput::Text(vec!["no move".to_string()])
            }
        },
        "drag" => {
            let id = parse_sequence(parts.next())?;
            let index = parse_index(parts.next(), "index")?;
            let dx = parse_offset(parts.next(), "dx")?;
            let dy = parse_offset(parts.next(), "dy")?;
            launcher.drag(id, DragEvent::Start { index });
            launcher.drag(id, DragEvent::Move { dx, dy });
            CommandOutput::Text(describe_drag(launcher.drag(id, DragEvent::End)))
        },
        "search" => {
            let query: Vec<&str> = parts.collect();
            launcher.library_mut().show();
            launcher.library_mut().update_query(query.join(" "));
            CommandOutput::Text(render_library(&launcher.library_view()))
        },
        "clear" => {
            launcher.library_mut().clear_query();
            CommandOutput::None
        },
        "library" => {
            launcher.library_mut().show();
            CommandOutput::Text(render_library(&launcher.library_view()))
        },
        "swipe" => {
            let dy = parse_offset(parts.next(), "dy")?;
            launcher.begin_swipe();
            let opened = launcher.swipe_by(dy);
            launcher.end_swipe();
            if opened {
                CommandOutput::Text(render_library(&launcher.library_view()))
            } else {
                CommandOutput::None
            }
        },
        "launch" => {
            let package = parts.next().context("missing package")?;
            if launcher.store().find(package).is_none() {
                bail!("unknown app: {package}");
            }
            launcher.launch(package);
            CommandOutput::None
        },
        "save" => {
            launcher.save_layout()?;
            CommandOutput::Text(vec!["layout saved".to_string()])
        },
        "export" => {
            let json = launcher.store().snapshot().to_json()?;
            CommandOutput::Text(json.lines().map(str::to_string).collect())
        },
        "refresh" => {
            launcher.begin_refresh();
            CommandOutput::Text(vec!["refreshing...".to_string()])
        },
        "quit" | "exit" => CommandOutput::Quit,
        other => bail!("unknown command: {other} (try 'help')"),
    };
    Ok(output)
}
