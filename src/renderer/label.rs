//! Label layout inside a ball

use glam::Vec2;

use crate::consts::{LABEL_LINE_HEIGHT, LABEL_MAX_LINES};

/// Greedy word wrap: words are packed onto a line until `measure` exceeds
/// `max_width`. A single word wider than `max_width` stays whole on its own
/// line. At most `LABEL_MAX_LINES` lines are kept; the rest is dropped.
pub fn wrap_label<F>(label: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in label.split(' ').filter(|w| !w.is_empty()) {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(LABEL_MAX_LINES);
    lines
}

/// Baseline centers for `count` lines stacked around `center`
pub fn line_origins(center: Vec2, count: usize) -> impl Iterator<Item = Vec2> {
    let first_y = center.y - (count.saturating_sub(1)) as f32 * LABEL_LINE_HEIGHT / 2.0;
    (0..count).map(move |i| Vec2::new(center.x, first_y + i as f32 * LABEL_LINE_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 6 px per character, like a small bold sans-serif
    fn mono(text: &str) -> f32 {
        text.chars().count() as f32 * 6.0
    }

    #[test]
    fn test_short_label_single_line() {
        assert_eq!(wrap_label("No. 7", 36.0, mono), vec!["No. 7"]);
        // Exactly at the limit still fits
        assert_eq!(wrap_label("No. 7", 30.0, mono), vec!["No. 7"]);
    }

    #[test]
    fn test_ball_width_splits_numbered_label() {
        // 18 px radius gives 28.8 px; "No. 7" is 30 px wide
        assert_eq!(wrap_label("No. 7", 18.0 * 1.6, mono), vec!["No.", "7"]);
    }

    #[test]
    fn test_wraps_and_truncates() {
        // "Gift" = 24px fits, "Gift card" = 54px does not
        let lines = wrap_label("Gift card for two people", 30.0, mono);
        assert_eq!(lines, vec!["Gift", "card"]);
    }

    #[test]
    fn test_long_word_not_split() {
        let lines = wrap_label("Supercalifragilistic", 10.0, mono);
        assert_eq!(lines, vec!["Supercalifragilistic"]);
    }

    #[test]
    fn test_empty_label() {
        assert!(wrap_label("", 30.0, mono).is_empty());
    }

    #[test]
    fn test_line_origins_centered() {
        let ys: Vec<f32> = line_origins(Vec2::new(50.0, 100.0), 2).map(|p| p.y).collect();
        assert_eq!(ys, vec![100.0 - LABEL_LINE_HEIGHT / 2.0, 100.0 + LABEL_LINE_HEIGHT / 2.0]);

        let single: Vec<Vec2> = line_origins(Vec2::new(50.0, 100.0), 1).collect();
        assert_eq!(single, vec![Vec2::new(50.0, 100.0)]);
    }
}
