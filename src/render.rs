//! Draw-command composition
//!
//! Turns a `GameState` into an ordered list of backend-agnostic draw commands.
//! Commands are painter-ordered: later commands draw over earlier ones.

use glam::{DVec2, DVec3};

use crate::consts::*;
use crate::ranking::RankingEntry;
use crate::sim::spawner::SHY_LANE_STUB;
use crate::sim::{
    Bullet, Enemy, EnemyKind, GameMode, GameState, anchor_on_screen, bullet_from_release,
    hold_position, sight, to_camera, to_screen,
};

/// RGBA, 8 bits per channel
pub type Color = [u8; 4];

/// Color palette
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0xc7, 0xd7, 0xc7, 0xff];
    pub const WATER: Color = [0x0f, 0x5d, 0xfa, 0xff];
    pub const SCAFFOLD: Color = [0xfa, 0x68, 0x35, 0xff];
    pub const BULLET: Color = [0x40, 0xa0, 0xff, 0xff];
    pub const SPLASH: Color = [0xff, 0xff, 0xff, 0xff];
    pub const GAIN: Color = [0xff, 0xe0, 0x00, 0xff];
    pub const SIGHT_LINE: Color = [0xff, 0xff, 0xff, 0xff];
    pub const SIGHT_MARK: Color = [0x00, 0x00, 0x00, 0x30];
    pub const TITLE: Color = [0x00, 0x00, 0x50, 0xff];
    pub const TEXT: Color = [0xff, 0xff, 0xff, 0xff];
    pub const DIM: Color = [0x00, 0x00, 0x00, 0x80];
}

/// Bitmap font sizes (square glyphs, pixels per side)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub fn px(self) -> f64 {
        match self {
            FontSize::Small => 10.0,
            FontSize::Medium => 16.0,
            FontSize::Large => 24.0,
        }
    }
}

/// Sprite sheet entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Fish { frame: u8 },
    Enemy { kind: EnemyKind, frame: u8 },
    Leaf,
}

/// Width of an enemy sprite frame in sheet pixels
pub const ENEMY_SPRITE_WIDTH: f64 = 7.0;
/// Ticks per animation frame
const FRAME_TICKS: u64 = 30;
const SIGHT_MARK_RADIUS: f64 = 10.0;
const SPLASH_SIZE: f64 = 3.0;
/// Gap under each lane line before its scaffold bar
const NORMAL_SCAFFOLD_DROP: f64 = 5.0;
const UPPER_SCAFFOLD_DROP: f64 = 4.0;
const SCAFFOLD_THICKNESS: f64 = 10.0;

/// One primitive for the host renderer
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole screen
    Fill { color: Color },
    Rect { pos: DVec2, size: DVec2, color: Color },
    Circle { center: DVec2, radius: f64, color: Color },
    Line { from: DVec2, to: DVec2, color: Color },
    /// Sprite centered on `center`; negative scale mirrors
    Sprite {
        sprite: SpriteId,
        center: DVec2,
        scale: DVec2,
        rotation: f64,
    },
    /// Text with its top-left corner at `pos`
    Text {
        text: String,
        size: FontSize,
        pos: DVec2,
        color: Color,
    },
}

/// Build the frame for the current state
pub fn compose(state: &GameState, player_id: &str) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(64 + state.splashes.len() + state.enemies.len());

    out.push(DrawCommand::Fill {
        color: colors::BACKGROUND,
    });
    out.push(DrawCommand::Rect {
        pos: DVec2::new(0.0, SCREEN_HEIGHT / 2.0),
        size: DVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT / 2.0),
        color: colors::WATER,
    });

    match state.mode {
        GameMode::Title => {
            title_text(&mut out);
            scaffold(&mut out);
            for enemy in demo_enemies() {
                enemy_sprite(&mut out, &enemy);
            }
            leaves(&mut out, state);
            fish(&mut out, state);
        }
        GameMode::Playing => {
            field(&mut out, state, true);
            if state.timer_running() && !state.fish.aiming && state.score == 0 {
                centered(&mut out, "Drag me!", FontSize::Small, 320.0, colors::TEXT);
            }
            if state.fish.aiming {
                sight_marker(&mut out, state.pointer);
            }
            time(&mut out, state);
            score(&mut out, state);
        }
        GameMode::GameOver => {
            field(&mut out, state, false);
            time(&mut out, state);
            score(&mut out, state);
            game_over(&mut out, state);
        }
        GameMode::Ranking => {
            field(&mut out, state, false);
            time(&mut out, state);
            score(&mut out, state);
            ranking(&mut out, &state.ranking, player_id);
        }
    }

    out
}

/// Bullets, scaffold, enemies, leaves, splashes, effects and fish in depth order
fn field(out: &mut Vec<DrawCommand>, state: &GameState, with_gains: bool) {
    let (far, near): (Vec<&Bullet>, Vec<&Bullet>) =
        state.bullets.iter().partition(|b| b.pos.z > ENEMY_Z);

    for bullet in far {
        bullet_circle(out, bullet);
    }
    scaffold(out);
    for enemy in &state.enemies {
        enemy_sprite(out, enemy);
    }
    leaves(out, state);
    for splash in state.splashes.iter().filter(|s| s.pos.y < 0.0) {
        out.push(DrawCommand::Rect {
            pos: to_screen(splash.pos),
            size: DVec2::splat(SPLASH_SIZE),
            color: colors::SPLASH,
        });
    }
    for bullet in near {
        bullet_circle(out, bullet);
    }
    if with_gains {
        for gain in &state.gains {
            out.push(DrawCommand::Text {
                text: gain.label(),
                size: FontSize::Medium,
                pos: gain.pos,
                color: colors::GAIN,
            });
        }
    }
    fish(out, state);
}

fn bullet_circle(out: &mut Vec<DrawCommand>, bullet: &Bullet) {
    out.push(DrawCommand::Circle {
        center: to_screen(bullet.pos),
        radius: bullet.radius * FISH_Z / bullet.pos.z,
        color: colors::BULLET,
    });
}

fn scaffold(out: &mut Vec<DrawCommand>) {
    let bar = |x: f64, y: f64, w: f64| DrawCommand::Rect {
        pos: DVec2::new(x, y),
        size: DVec2::new(w, SCAFFOLD_THICKNESS),
        color: colors::SCAFFOLD,
    };
    out.push(bar(0.0, NORMAL_LANE_Y + NORMAL_SCAFFOLD_DROP, SCREEN_WIDTH));
    out.push(bar(0.0, DIZZY_LANE_Y + UPPER_SCAFFOLD_DROP, SCREEN_WIDTH));
    out.push(bar(0.0, SHY_LANE_Y + UPPER_SCAFFOLD_DROP, SHY_LANE_STUB));
    out.push(bar(
        SCREEN_WIDTH - SHY_LANE_STUB,
        SHY_LANE_Y + UPPER_SCAFFOLD_DROP,
        SHY_LANE_STUB,
    ));
}

fn enemy_sprite(out: &mut Vec<DrawCommand>, enemy: &Enemy) {
    let center = to_screen(enemy.pos);
    let edge = to_screen(enemy.pos - DVec3::new(enemy.radius, 0.0, 0.0));
    let size = (edge.x - center.x).abs() * 2.0 / ENEMY_SPRITE_WIDTH;

    let sx = if enemy.faces_right() { -size } else { size };
    let sy = if enemy.hit { -size } else { size };

    out.push(DrawCommand::Sprite {
        sprite: SpriteId::Enemy {
            kind: enemy.kind,
            frame: ((enemy.ticks / FRAME_TICKS) % 2) as u8,
        },
        center,
        scale: DVec2::new(sx, sy),
        rotation: 0.0,
    });
}

fn leaves(out: &mut Vec<DrawCommand>, state: &GameState) {
    out.extend(state.leaves.iter().map(|leaf| DrawCommand::Sprite {
        sprite: SpriteId::Leaf,
        center: leaf.pos,
        scale: leaf.scale,
        rotation: leaf.rotation,
    }));
}

fn fish(out: &mut Vec<DrawCommand>, state: &GameState) {
    let frame = if state.fish.aiming {
        2
    } else {
        ((state.fish.ticks / FRAME_TICKS) % 2) as u8
    };
    out.push(DrawCommand::Sprite {
        sprite: SpriteId::Fish { frame },
        center: to_screen(state.fish.pos),
        scale: DVec2::ONE,
        rotation: 0.0,
    });
}

/// Drag line from the fish plus the predicted landing point
fn sight_marker(out: &mut Vec<DrawCommand>, pointer: DVec2) {
    let hold = hold_position(pointer);
    out.push(DrawCommand::Line {
        from: anchor_on_screen(),
        to: hold,
        color: colors::SIGHT_LINE,
    });
    let target = sight(&bullet_from_release(hold)).on_screen();
    out.push(DrawCommand::Circle {
        center: target,
        radius: SIGHT_MARK_RADIUS,
        color: colors::SIGHT_MARK,
    });
}

fn time(out: &mut Vec<DrawCommand>, state: &GameState) {
    if state.mode == GameMode::Playing && state.mode_ticks < LEAD_IN_TICKS {
        let count = state.lead_in_seconds_left().to_string();
        centered(out, &count, FontSize::Large, 260.0, colors::TEXT);
    } else {
        let left = state.seconds_left().to_string();
        centered(out, &left, FontSize::Small, 20.0, colors::TEXT);
    }
}

fn score(out: &mut Vec<DrawCommand>, state: &GameState) {
    let text = format!("SCORE {}", state.score);
    let px = FontSize::Small.px();
    out.push(DrawCommand::Text {
        pos: DVec2::new(SCREEN_WIDTH - (text.len() as f64 + 1.0) * px, 20.0),
        text,
        size: FontSize::Small,
        color: colors::TEXT,
    });
}

fn title_text(out: &mut Vec<DrawCommand>) {
    centered(out, "ARCHERFISH", FontSize::Large, 75.0, colors::TITLE);

    let small = FontSize::Small.px();
    let usage = ["[DRAG] Set sights on", "[RELEASE] Shoot"];
    for (i, line) in usage.iter().enumerate() {
        centered(out, line, FontSize::Small, 280.0 + i as f64 * small * 1.8, colors::TEXT);
    }

    let credits = [
        "CREATOR: NAOKI TSUJIO",
        "FONT: Press Start 2P by CodeMan38",
        "SOUND EFFECT: MaouDamashii",
    ];
    for (i, line) in credits.iter().enumerate() {
        centered(out, line, FontSize::Small, 420.0 + i as f64 * small * 1.8, colors::TEXT);
    }
}

fn game_over(out: &mut Vec<DrawCommand>, state: &GameState) {
    centered(out, "GAME OVER", FontSize::Large, 185.0, colors::TEXT);
    let medium = FontSize::Medium.px();
    let lines = ["YOUR SCORE IS".to_string(), format!("{}!", state.score)];
    for (i, line) in lines.iter().enumerate() {
        centered(out, line, FontSize::Medium, 275.0 + i as f64 * medium * 2.0, colors::TEXT);
    }
}

fn ranking(out: &mut Vec<DrawCommand>, entries: &[RankingEntry], player_id: &str) {
    out.push(DrawCommand::Rect {
        pos: DVec2::ZERO,
        size: DVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        color: colors::DIM,
    });
    centered(out, "RANKING", FontSize::Large, 60.0, colors::TEXT);

    let medium = FontSize::Medium.px();
    for (i, entry) in entries.iter().enumerate() {
        let marker = if entry.player_id == player_id { "YOU" } else { "   " };
        let line = format!("{:>2}. {:>5} {}", i + 1, entry.score, marker);
        let color = if marker == "YOU" { colors::GAIN } else { colors::TEXT };
        centered(out, &line, FontSize::Medium, 120.0 + i as f64 * medium * 1.8, color);
    }
}

fn centered(out: &mut Vec<DrawCommand>, text: &str, size: FontSize, y: f64, color: Color) {
    let x = SCREEN_WIDTH / 2.0 - text.chars().count() as f64 * size.px() / 2.0;
    out.push(DrawCommand::Text {
        text: text.to_string(),
        size,
        pos: DVec2::new(x, y),
        color,
    });
}

/// Fixed enemies posed on the scaffold behind the title
fn demo_enemies() -> Vec<Enemy> {
    let poses = [
        (EnemyKind::Normal, 100.0, 1.0),
        (EnemyKind::Normal, SCREEN_WIDTH - 70.0, -1.0),
        (EnemyKind::Dizzy, 250.0, 1.0),
        (EnemyKind::Dizzy, SCREEN_WIDTH - 150.0, -1.0),
        (EnemyKind::Shy, 50.0, 1.0),
    ];
    poses
        .into_iter()
        .map(|(kind, x, vx)| {
            let cam = to_camera(DVec2::new(x, kind.lane_y()), ENEMY_Z);
            Enemy::new(kind, DVec3::new(cam.x, cam.y, ENEMY_Z), vx)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SeedPolicy, TickInput, tick};

    fn playing_state() -> GameState {
        let mut state = GameState::new(SeedPolicy::Fixed(5));
        tick(&mut state, &TickInput::press(DVec2::ZERO));
        for _ in 0..=LEAD_IN_TICKS {
            tick(&mut state, &TickInput::default());
        }
        state
    }

    fn texts(cmds: &[DrawCommand]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn position(cmds: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
        cmds.iter().position(pred).unwrap()
    }

    #[test]
    fn test_title_frame() {
        let state = GameState::new(SeedPolicy::Fixed(5));
        let cmds = compose(&state, "me");
        assert!(matches!(cmds[0], DrawCommand::Fill { .. }));
        assert!(texts(&cmds).contains(&"ARCHERFISH"));
        let enemies = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sprite: SpriteId::Enemy { .. }, .. }))
            .count();
        assert_eq!(enemies, 5);
        assert!(matches!(
            cmds.last(),
            Some(DrawCommand::Sprite { sprite: SpriteId::Fish { frame: 0 }, .. })
        ));
    }

    fn text_at<'a>(cmds: &'a [DrawCommand], wanted: &str) -> Option<&'a DVec2> {
        cmds.iter().find_map(|c| match c {
            DrawCommand::Text { text, pos, .. } if text == wanted => Some(pos),
            _ => None,
        })
    }

    #[test]
    fn test_title_usage_and_demo_poses() {
        let state = GameState::new(SeedPolicy::Fixed(5));
        let cmds = compose(&state, "me");

        let small = FontSize::Small.px();
        let usage = text_at(&cmds, "[DRAG] Set sights on").unwrap();
        assert_eq!(usage.y, 280.0);
        let release = text_at(&cmds, "[RELEASE] Shoot").unwrap();
        assert!((release.y - (280.0 + small * 1.8)).abs() < 1e-9);
        let font = text_at(&cmds, "FONT: Press Start 2P by CodeMan38").unwrap();
        assert!((font.y - (420.0 + small * 1.8)).abs() < 1e-9);

        let demo: Vec<(DVec2, DVec2)> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite {
                    sprite: SpriteId::Enemy { .. },
                    center,
                    scale,
                    ..
                } => Some((*center, *scale)),
                _ => None,
            })
            .collect();
        let xs: Vec<f64> = demo.iter().map(|(c, _)| c.x).collect();
        for (x, want) in xs.iter().zip([100.0, 570.0, 250.0, 490.0, 50.0]) {
            assert!((x - want).abs() < 1e-9, "{x} != {want}");
        }
        // Entering from the left faces right (mirrored)
        assert!(demo[0].1.x < 0.0);
        assert!(demo[1].1.x > 0.0);

        assert_eq!(
            cmds[0],
            DrawCommand::Fill {
                color: [0xc7, 0xd7, 0xc7, 0xff]
            }
        );
    }

    #[test]
    fn test_running_clock_is_centered() {
        let state = playing_state();
        let cmds = compose(&state, "me");
        let pos = text_at(&cmds, "60").unwrap();
        assert_eq!(*pos, DVec2::new(SCREEN_WIDTH / 2.0 - FontSize::Small.px(), 20.0));
    }

    #[test]
    fn test_lead_in_countdown_then_clock() {
        let mut state = GameState::new(SeedPolicy::Fixed(5));
        tick(&mut state, &TickInput::press(DVec2::ZERO));
        assert!(texts(&compose(&state, "me")).contains(&"3"));

        for _ in 0..=LEAD_IN_TICKS {
            tick(&mut state, &TickInput::default());
        }
        let cmds = compose(&state, "me");
        let t = texts(&cmds);
        assert!(t.contains(&"60"));
        assert!(t.contains(&"SCORE 0"));
        assert!(t.contains(&"Drag me!"));
    }

    #[test]
    fn test_far_bullets_draw_behind_scaffold() {
        let mut state = playing_state();
        let mut far = Bullet::new(DVec3::new(0.0, -100.0, ENEMY_Z + 10.0), DVec3::ZERO);
        far.radius = 7.0;
        let near = Bullet::new(DVec3::new(0.0, -100.0, ENEMY_Z - 10.0), DVec3::ZERO);
        state.bullets = vec![near, far];

        let cmds = compose(&state, "me");
        let scaffold_at = position(&cmds, |c| {
            matches!(c, DrawCommand::Rect { color, .. } if *color == colors::SCAFFOLD)
        });
        let far_at = position(&cmds, |c| {
            matches!(c, DrawCommand::Circle { color, radius, .. }
                if *color == colors::BULLET && (*radius - 7.0 * FISH_Z / (ENEMY_Z + 10.0)).abs() < 1e-9)
        });
        let near_at = position(&cmds, |c| {
            matches!(c, DrawCommand::Circle { color, radius, .. }
                if *color == colors::BULLET && (*radius - BULLET_RADIUS * FISH_Z / (ENEMY_Z - 10.0)).abs() < 1e-9)
        });
        assert!(far_at < scaffold_at);
        assert!(near_at > scaffold_at);
    }

    #[test]
    fn test_enemy_sprite_mirroring() {
        let mut state = playing_state();
        let mut falling = Enemy::new(EnemyKind::Normal, DVec3::new(0.0, -100.0, ENEMY_Z), 2.0);
        falling.hit = true;
        let walking_left = Enemy::new(EnemyKind::Normal, DVec3::new(0.0, -100.0, ENEMY_Z), -2.0);
        state.enemies = vec![falling, walking_left];

        let scales: Vec<DVec2> = compose(&state, "me")
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite {
                    sprite: SpriteId::Enemy { .. },
                    scale,
                    ..
                } => Some(scale),
                _ => None,
            })
            .collect();
        assert_eq!(scales.len(), 2);
        assert!(scales[0].x < 0.0 && scales[0].y < 0.0);
        assert!(scales[1].x > 0.0 && scales[1].y > 0.0);
        let expected = NORMAL_ENEMY_RADIUS * CAMERA_F / ENEMY_Z * 2.0 / ENEMY_SPRITE_WIDTH;
        assert!((scales[1].x - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sight_while_aiming() {
        let mut state = playing_state();
        state.fish.aiming = true;
        state.pointer = DVec2::new(anchor_on_screen().x, SCREEN_HEIGHT);

        let cmds = compose(&state, "me");
        assert!(cmds.iter().any(|c| matches!(c, DrawCommand::Line { .. })));
        assert!(!texts(&cmds).contains(&"Drag me!"));
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCommand::Sprite { sprite: SpriteId::Fish { frame: 2 }, .. }
        )));
    }

    #[test]
    fn test_splashes_below_surface_hidden() {
        let mut state = playing_state();
        state.splashes.clear();
        state.splashes.push(crate::sim::SplashEffect::new(DVec3::new(0.0, 5.0, FISH_Z), DVec2::ZERO));
        state.splashes.push(crate::sim::SplashEffect::new(DVec3::new(0.0, -5.0, FISH_Z), DVec2::ZERO));
        let count = compose(&state, "me")
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { color, .. } if *color == colors::SPLASH))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_ranking_marks_player() {
        let mut state = GameState::new(SeedPolicy::Fixed(5));
        state.mode = GameMode::Ranking;
        state.ranking = vec![
            RankingEntry {
                player_id: "rival".into(),
                score: 9,
            },
            RankingEntry {
                player_id: "me".into(),
                score: 4,
            },
        ];
        let cmds = compose(&state, "me");
        let t = texts(&cmds);
        assert!(t.contains(&"RANKING"));
        assert!(t.contains(&" 1.     9    "));
        assert!(t.contains(&" 2.     4 YOU"));
    }

    #[test]
    fn test_game_over_text() {
        let mut state = GameState::new(SeedPolicy::Fixed(5));
        state.mode = GameMode::GameOver;
        state.score = 12;
        let t = texts(&compose(&state, "me")).join("|");
        assert!(t.contains("GAME OVER"));
        assert!(t.contains("12!"));
    }
}
