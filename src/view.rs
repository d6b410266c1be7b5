//! コンソール表示
//!
//! ブラウザ版のネイル要素・トーストの代わりに、配置表とメッセージを標準出力に出す。

use nail_studio_common::{NailId, PlacementSet, PlacementView};
use std::cell::RefCell;

/// 配置表の1行（表示順）
pub fn placement_rows(placements: &PlacementSet) -> Vec<String> {
    NailId::ALL
        .iter()
        .filter_map(|&id| {
            placements.get(id).map(|p| {
                format!(
                    "{:<7} left {:>6.2}%  top {:>6.2}%  {}",
                    id.as_str(),
                    p.left_percent(),
                    p.top_percent(),
                    p.css_transform()
                )
            })
        })
        .collect()
}

#[derive(Default)]
pub struct ConsoleView {
    messages: RefCell<Vec<String>>,
    quiet: bool,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 出力せずにメッセージだけ記録する
    pub fn quiet() -> Self {
        Self {
            messages: RefCell::new(Vec::new()),
            quiet: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl PlacementView for ConsoleView {
    fn apply_placements(&self, placements: &PlacementSet) {
        if self.quiet {
            return;
        }
        for row in placement_rows(placements) {
            println!("  {}", row);
        }
    }

    fn notify_user(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
        if !self.quiet {
            println!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nail_studio_common::Placement;

    #[test]
    fn test_rows_follow_display_order() {
        let set: PlacementSet = [
            (NailId::Thumb, Placement::new(70.0, 50.0, 30.0, 1.2)),
            (NailId::Pinky, Placement::new(17.0, 40.0, -14.0, 1.0)),
        ]
        .into_iter()
        .collect();

        let rows = placement_rows(&set);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("pinky"));
        assert!(rows[1].starts_with("thumb"));
        assert!(rows[1].contains("rotate(30.0deg) scale(1.20)"));
    }

    #[test]
    fn test_quiet_view_records_messages() {
        let view = ConsoleView::quiet();
        view.notify_user("hello");
        assert_eq!(view.messages(), vec!["hello".to_string()]);
    }
}
