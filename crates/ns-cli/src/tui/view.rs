//! Drawing the play screen.

use ns_core::{ClimaxStep, Facing, LineEffect, Mood, SceneId};
use ns_runtime::{Session, Snapshot};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app::PlayApp;

const VISION_HINT: &str = "按下 [F] 開啟「看取」  觀測不可見之物";
const MOVE_HINT: &str = "← → 移動";
const KEYS: &str = " ←/→ 移動   F 看取 (開/關)   Space/Enter 互動/對話   q 離開";

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &PlayApp) {
    let session = &app.session;
    let snap = session.snapshot();

    if !snap.started {
        draw_card(frame, "噩夢", "按 Enter 入夢", Color::Red);
        return;
    }
    if snap.epilogue_shown {
        draw_card(frame, "初章：歸鄉", "To Be Continued...", Color::Red);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Objective
            Constraint::Min(5),    // Stage
            Constraint::Length(2), // Notices and subtitle
            Constraint::Length(5), // Dialogue
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_objective(frame, session, &snap, chunks[0]);
    draw_stage(frame, session, &snap, chunks[1]);
    draw_captions(frame, session, &snap, chunks[2]);
    draw_dialogue(frame, session, chunks[3]);

    let mut keys = KEYS.to_string();
    if snap.vision {
        keys.push_str("   [看取]");
    }
    let status = Paragraph::new(keys).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[4]);
}

/// Title and epilogue screens: two centred lines on black.
fn draw_card(frame: &mut Frame, title: &str, subtitle: &str, color: Color) {
    let area = frame.area();
    let pad = area.height.saturating_sub(3) / 2;
    let mut lines = vec![Line::raw(""); usize::from(pad)];
    lines.push(Line::styled(title, Style::default().fg(color).bold()));
    lines.push(Line::raw(""));
    lines.push(Line::styled(subtitle, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_objective(frame: &mut Frame, session: &Session, snap: &Snapshot, area: Rect) {
    if snap.lying_down || snap.climax_step.is_active() || session.is_ended() {
        return;
    }
    let text = Paragraph::new(session.objective().text())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::LightRed));
    frame.render_widget(text, area);
}

fn draw_stage(frame: &mut Frame, session: &Session, snap: &Snapshot, area: Rect) {
    let border = if snap.vision {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", scene_title(snap.scene)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if snap.cover >= 0.99 || inner.width < 2 || inner.height < 2 {
        return;
    }

    let width = usize::from(inner.width);
    // Shake by nudging the whole row one cell every other beat.
    let nudge = usize::from(snap.shaking && (snap.at_ms / 60) % 2 == 1);
    let column = |x: f32| -> usize {
        let col = (x / 100.0 * (width - 1) as f32).round() as usize;
        (col + nudge).min(width - 1)
    };

    let blank = (' ', Style::default());
    let mut row = vec![blank; width];
    let mut ground = vec![('▁', Style::default().fg(Color::DarkGray)); width];

    for view in session.interactables() {
        let item = view.template;
        let hidden = item.kind.requires_vision() && !snap.vision;
        if hidden {
            continue;
        }
        let cell = if view.completed {
            ('·', Style::default().fg(Color::DarkGray))
        } else if item.kind.requires_vision() {
            ('✦', Style::default().fg(Color::Red).bold())
        } else {
            ('◆', Style::default().fg(Color::Yellow))
        };
        row[column(item.position)] = cell;
    }

    if let Some(min_x) = session.content().left_boundary(snap.scene) {
        ground[column(min_x)] = ('▏', Style::default().fg(Color::Red));
    }

    let player_col = column(snap.position.get());
    match snap.climax_step {
        ClimaxStep::Normal => {}
        ClimaxStep::ShadowEmerged => {
            let shadow = (player_col + 3).min(width - 1);
            row[shadow] = ('Ψ', Style::default().fg(Color::Red).bold());
        }
        ClimaxStep::VinesSmashed => {
            for cell in ground.iter_mut() {
                *cell = ('╫', Style::default().fg(Color::Red));
            }
        }
    }

    let player = if snap.lying_down { '_' } else { '@' };
    row[player_col] = (player, Style::default().fg(Color::White).bold());
    if snap.moving {
        let trail = match snap.facing {
            Facing::Right => player_col.checked_sub(1),
            Facing::Left => Some(player_col + 1).filter(|c| *c < width),
        };
        if let Some(trail) = trail
            && row[trail].0 == ' '
        {
            row[trail] = ('˙', Style::default().fg(Color::DarkGray));
        }
    }

    let dim = snap.cover > 0.0;
    let to_line = |cells: Vec<(char, Style)>| {
        Line::from(
            cells
                .into_iter()
                .map(|(c, style)| {
                    let style = if dim { style.fg(Color::DarkGray) } else { style };
                    Span::styled(c.to_string(), style)
                })
                .collect::<Vec<_>>(),
        )
    };

    let mut lines = vec![Line::raw(""); usize::from(inner.height.saturating_sub(2))];
    lines.push(to_line(row));
    lines.push(to_line(ground));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_captions(frame: &mut Frame, session: &Session, snap: &Snapshot, area: Rect) {
    let mut lines = Vec::new();

    if let Some(notice) = &snap.block_notice {
        lines.push(Line::styled(notice.as_str(), Style::default().fg(Color::Red)));
    } else if snap.vision_hint {
        lines.push(Line::styled(VISION_HINT, Style::default().fg(Color::LightRed).bold()));
    } else if snap.movement_hint && !snap.lying_down {
        lines.push(Line::styled(MOVE_HINT, Style::default().fg(Color::DarkGray)));
    } else if let Some(prompt) = session.prompt().filter(|p| !p.completed)
        && session.dialogue().is_none()
    {
        lines.push(Line::styled(
            format!("[Space] {}", prompt.template.label),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(subtitle) = session.subtitle()
        && session.dialogue().is_none()
        && !snap.transitioning
    {
        let speaker = subtitle.speaker.as_deref().unwrap_or_default();
        let style = if subtitle.whisper {
            Style::default().fg(Color::Gray).italic()
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{speaker} "), Style::default().fg(Color::Red)),
            Span::styled(subtitle.text.replace('\n', " "), style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_dialogue(frame: &mut Frame, session: &Session, area: Rect) {
    let Some(view) = session.dialogue() else {
        return;
    };

    let mut style = Style::default().fg(match view.mood {
        Mood::Normal => Color::White,
        Mood::Confused => Color::Yellow,
        Mood::Scared => Color::Magenta,
        Mood::Angry => Color::Red,
    });
    match view.effect {
        Some(LineEffect::Shake) => style = style.bold(),
        Some(LineEffect::Whisper) => style = style.italic().dim(),
        None => {}
    }

    let marker = match (view.typing_complete, view.is_last()) {
        (false, _) => "",
        (true, false) => " ▼",
        (true, true) => " ■",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", view.speaker))
        .title_bottom(format!(" {}/{} ", view.line + 1, view.line_count));
    let text = Paragraph::new(Line::from(vec![
        Span::styled(view.shown, style),
        Span::styled(marker, Style::default().fg(Color::DarkGray)),
    ]))
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(text, area);
}

fn scene_title(scene: SceneId) -> &'static str {
    match scene {
        SceneId::Intro => "序",
        SceneId::Forest => "樹林",
        SceneId::Meeting => "相遇",
        SceneId::Search => "尋物",
        SceneId::Path => "小徑",
        SceneId::Temple => "九姑娘廟",
        SceneId::Climax => "噩夢",
        SceneId::Ending => "終",
    }
}

