//! HTML body rendering: default layout, operator template, or the
//! start-over page for blocked requests.

use std::fmt::Write;

use super::gate::Visibility;
use super::level::LevelDescriptor;
use super::state::PlayerState;
use super::template::substitute;

/// Fixed page title substituted for `{{title}}` in operator templates.
pub const PAGE_TITLE: &str = "Choose Your Path";

/// Banner shown at the top of the default layout.
const BANNER: &str = concat!(
    "<pre> @@@@@@@ @@@  @@@  @@@@@@   @@@@@@   @@@@@@ @@@@@@@@    @@@ @@@  @@@@@@  @@@  @@@ @@@@@@@     @@@@@@@   @@@@@@  @@@@@@@ @@@  @@@<br />",
    "!@@      @@!  @@@ @@!  @@@ @@!  @@@ !@@     @@!         @@! !@@ @@!  @@@ @@!  @@@ @@!  @@@    @@!  @@@ @@!  @@@   @!!   @@!  @@@<br />",
    "!@!      @!@!@!@! @!@  !@! @!@  !@!  !@@!!  @!!!:!       !@!@!  @!@  !@! @!@  !@! @!@!!@!     @!@@!@!  @!@!@!@!   @!!   @!@!@!@!<br />",
    ":!!      !!:  !!! !!:  !!! !!:  !!!     !:! !!:           !!:   !!:  !!! !!:  !!! !!: :!!     !!:      !!:  !!!   !!:   !!:  !!!<br />",
    " :: :: :  :   : :  : :. :   : :. :  ::.: :  : :: ::       .:     : :. :   :.:: :   :   : :     :        :   : :    :     :   : : </pre>",
);

/// Everything the renderer needs for one request. Built by the orchestrator,
/// dropped with the request.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub state: PlayerState,
    pub level: &'a LevelDescriptor,
    pub visibility: Visibility,
    pub entry_route: &'a str,
}

/// Render the response body for a request.
///
/// Blocked requests always get the start-over page, whatever the level
/// configures. Visible requests get the operator template when one was
/// loaded, otherwise the default layout (a descriptor that named a template
/// file that could not be read arrives here with `template == None` and
/// falls back the same way).
pub fn render(ctx: &RenderContext<'_>) -> String {
    if !ctx.visibility.is_visible() {
        return render_blocked(ctx.entry_route);
    }
    match ctx.level.template.as_deref() {
        Some(template) => render_templated(template, ctx.state, ctx.level),
        None => render_default(ctx.state, ctx.level),
    }
}

/// The two-choice navigation block, shared by both visible layouts. A level
/// with no left choice renders only the right link.
fn choices_fragment(level: &LevelDescriptor) -> String {
    if level.has_left_choice() {
        format!(
            "<p><--<a href=\"{}\">{}</a> (O) <a href=\"{}\">{}</a> --></p>",
            level.left_path, level.left_label, level.right_path, level.right_label
        )
    } else {
        format!(
            "<p>(O) <a href=\"{}\">{}</a> --></p>",
            level.right_path, level.right_label
        )
    }
}

fn render_default(state: PlayerState, level: &LevelDescriptor) -> String {
    let mut body = String::with_capacity(BANNER.len() + 512);
    body.push_str(BANNER);
    // Current totals first, then the story, then what this level just did.
    let _ = write!(body, "Treasure: {}<br />", state.treasure);
    let _ = write!(body, "Health: {}<br />", state.health);
    let _ = write!(body, "<h3>{}</h3>", level.title);
    let _ = write!(body, "<p>{}</p>", level.description);
    body.push_str(&choices_fragment(level));
    body.push_str("<p>--Stats--</p>");
    let _ = write!(body, "<p>Gained {} treasure</p>", level.treasure_reward);
    let _ = write!(body, "<p>Took {} damage</p>", level.damage_amount);
    body
}

fn render_templated(template: &str, state: PlayerState, level: &LevelDescriptor) -> String {
    let health = state.health.to_string();
    let treasure = state.treasure.to_string();
    let choices = choices_fragment(level);
    substitute(
        template,
        &[
            ("{{title}}", PAGE_TITLE),
            ("{{health}}", &health),
            ("{{treasure}}", &treasure),
            ("{{choices}}", &choices),
            ("{{stageTitle}}", &level.title),
            ("{{description}}", &level.description),
        ],
    )
}

fn render_blocked(entry_route: &str) -> String {
    format!(
        "<h2>You must start at the beginning.<br /><a href='{}'>Start Here</a></h2><br /><br /><br />",
        entry_route
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> LevelDescriptor {
        LevelDescriptor {
            title: "Stage 2: Steps to a house.".to_string(),
            description: "A house looms ahead.".to_string(),
            left_path: "/cyp".to_string(),
            left_label: "Back to stage 1.".to_string(),
            right_path: "/cyp/stage3".to_string(),
            right_label: "Stage 3.".to_string(),
            treasure_reward: "10".to_string(),
            damage_amount: "20".to_string(),
            template: None,
        }
    }

    #[test]
    fn default_layout_shows_current_totals_and_configured_deltas() {
        let level = sample_level();
        let ctx = RenderContext {
            state: PlayerState {
                treasure: 60,
                health: 780,
            },
            level: &level,
            visibility: Visibility::Visible,
            entry_route: "/cyp",
        };
        let body = render(&ctx);
        assert!(body.contains("Treasure: 60<br />"));
        assert!(body.contains("Health: 780<br />"));
        assert!(body.contains("<h3>Stage 2: Steps to a house.</h3>"));
        assert!(body.contains("<a href=\"/cyp/stage3\">Stage 3.</a>"));
        assert!(body.contains("<p>Gained 10 treasure</p>"));
        assert!(body.contains("<p>Took 20 damage</p>"));
    }

    #[test]
    fn default_layout_omits_empty_left_choice() {
        let mut level = sample_level();
        level.left_path.clear();
        level.left_label.clear();
        let body = choices_fragment(&level);
        assert!(!body.contains("<--"));
        assert!(body.contains("<a href=\"/cyp/stage3\">Stage 3.</a>"));
    }

    #[test]
    fn templated_layout_substitutes_computed_stats() {
        let mut level = sample_level();
        level.template = Some("<h1>{{title}}</h1>{{health}} {{treasure}}".to_string());
        let ctx = RenderContext {
            state: PlayerState {
                treasure: 60,
                health: 780,
            },
            level: &level,
            visibility: Visibility::Visible,
            entry_route: "/cyp",
        };
        assert_eq!(render(&ctx), "<h1>Choose Your Path</h1>780 60");
    }

    #[test]
    fn templated_layout_expands_choices_and_story_tokens() {
        let mut level = sample_level();
        level.template =
            Some("{{stageTitle}}|{{description}}|{{choices}}".to_string());
        let ctx = RenderContext {
            state: PlayerState::fresh(),
            level: &level,
            visibility: Visibility::Visible,
            entry_route: "/cyp",
        };
        let body = render(&ctx);
        assert!(body.starts_with("Stage 2: Steps to a house.|A house looms ahead.|"));
        assert!(body.contains("<a href=\"/cyp\">Back to stage 1.</a>"));
    }

    #[test]
    fn blocked_request_gets_start_over_page_even_with_template() {
        let mut level = sample_level();
        level.template = Some("{{stageTitle}}".to_string());
        let ctx = RenderContext {
            state: PlayerState::fresh(),
            level: &level,
            visibility: Visibility::Blocked,
            entry_route: "/cyp",
        };
        let body = render(&ctx);
        assert!(body.contains("You must start at the beginning."));
        assert!(body.contains("<a href='/cyp'>Start Here</a>"));
        assert!(!body.contains("Stage 2"));
    }
}
