//! Terminal rendering of a [`RenderFrame`].

use crate::core::render::RenderFrame;
use crate::core::types::Phase;
use crate::ui::game_common::{
    create_game_layout, render_info_panel_frame, render_modal, render_status_bar, title_line,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PIPE_COLOR: Color = Color::Rgb(100, 170, 40);
const GROUND_COLOR: Color = Color::Rgb(185, 160, 90);
const BIRD_COLORS: [Color; 3] = [
    Color::Rgb(245, 200, 66),
    Color::Rgb(255, 225, 100),
    Color::Rgb(215, 165, 35),
];

const CONTROLS: &[(&str, &str)] = &[("[Space/Up/Click]", "Flap"), ("[q/Esc]", "Quit")];

/// Host-side details that are not part of the simulation.
pub struct SceneInfo<'a> {
    pub difficulty: &'a str,
    pub best: Option<u32>,
    /// Rank earned by the run that just ended, if it made the table.
    pub new_rank: Option<usize>,
}

/// Render the whole play screen.
pub fn render_flappy(frame: &mut Frame, area: Rect, view: &RenderFrame, info: &SceneInfo) {
    let layout = create_game_layout(frame, area, " Flappy ", Color::Cyan, 22);

    render_play_area(frame, layout.content, view);
    render_status(frame, layout.status_bar, view);
    render_info_panel(frame, layout.info_panel, view, info);

    match view.phase {
        Phase::Ready => render_ready(frame, layout.content, info),
        Phase::Over(_) => render_game_over(frame, layout.content, view, info),
        Phase::Running => {}
    }
}

/// Sample the world at the center of every terminal cell.
fn render_play_area(frame: &mut Frame, area: Rect, view: &RenderFrame) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let x_scale = view.width / width as f64;
    let y_scale = view.height / height as f64;

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let world_y = (row as f64 + 0.5) * y_scale;
        let spans: Vec<Span> = (0..width)
            .map(|col| cell_at(view, (col as f64 + 0.5) * x_scale, world_y, y_scale))
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn cell_at(view: &RenderFrame, x: f64, y: f64, y_scale: f64) -> Span<'static> {
    let bird = &view.bird;
    // Rows are coarse; widen the bird's vertical band so it always shows.
    let half_row = y_scale / 2.0;
    if x >= bird.x
        && x < bird.x + bird.width
        && y + half_row >= bird.y
        && y - half_row < bird.y + bird.height
    {
        let glyph = if bird.velocity < -4.0 {
            "▲"
        } else if bird.velocity > 8.0 {
            "▼"
        } else {
            "►"
        };
        let color = BIRD_COLORS[bird.frame as usize % BIRD_COLORS.len()];
        return Span::styled(
            glyph,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
    }

    if y >= view.ground_line {
        return Span::styled("▓", Style::default().fg(GROUND_COLOR));
    }

    let in_pipe = view
        .pipes
        .iter()
        .any(|p| x >= p.x && x < p.x + p.width && (y < p.top || y >= p.bottom));
    if in_pipe {
        return Span::styled("█", Style::default().fg(PIPE_COLOR));
    }

    Span::raw(" ")
}

fn render_status(frame: &mut Frame, area: Rect, view: &RenderFrame) {
    match view.phase {
        Phase::Ready => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            CONTROLS,
        ),
        Phase::Running => render_status_bar(
            frame,
            area,
            &format!("Score: {}   Level: {}", view.hud.score, view.hud.level),
            Color::Green,
            CONTROLS,
        ),
        Phase::Over(collision) => render_status_bar(
            frame,
            area,
            &format!("You {}. Press Space for the menu.", collision.describe()),
            Color::Red,
            CONTROLS,
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &RenderFrame, info: &SceneInfo) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let row = |name: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!(" {name}: "), label),
            Span::styled(value, Style::default().fg(color)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", info.difficulty),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        row("Score", view.hud.score.to_string(), Color::White),
        row("Level", view.hud.level.to_string(), Color::Yellow),
        Line::from(""),
        row("Speed", format!("{:.1}", view.hud.speed), Color::Green),
        row("Gap", format!("{:.0}", view.hud.gap), Color::Green),
        Line::from(""),
        row(
            "Best",
            info.best.map_or_else(|| "-".to_string(), |b| b.to_string()),
            Color::Magenta,
        ),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_ready(frame: &mut Frame, area: Rect, info: &SceneInfo) {
    let mut lines = vec![
        title_line("FLAPPY", Color::Yellow),
        Line::from(""),
        Line::from("Flap through the gaps."),
        Line::from("Every pipe passed scores a point."),
    ];
    if let Some(best) = info.best {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Best: {best}"),
            Style::default().fg(Color::Magenta),
        )));
    }
    render_modal(frame, area, Color::Yellow, lines);
}

fn render_game_over(frame: &mut Frame, area: Rect, view: &RenderFrame, info: &SceneInfo) {
    let cause = match view.phase {
        Phase::Over(collision) => collision.describe(),
        _ => return,
    };

    let mut lines = vec![
        title_line("CRASH!", Color::Red),
        Line::from(""),
        Line::from(format!("You {cause} after {} pipes.", view.hud.score)),
        Line::from(format!("Reached level {}.", view.hud.level)),
    ];
    if let Some(rank) = info.new_rank {
        lines.push(Line::from(Span::styled(
            format!("New high score! Rank #{rank}"),
            Style::default().fg(Color::Magenta),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Space] Menu",
        Style::default().fg(Color::DarkGray),
    )));
    render_modal(frame, area, Color::Red, lines);
}
