//! # ページネーションコントロール
//!
//! `(total, page)` から一覧下部に並べるページ送りボタンを決定的に算出する。
//!
//! `p` を現在ページ（0 始まり）、`T` を総ページ数として:
//!
//! | コントロール | ラベル | 表示条件 |
//! |---|---|---|
//! | 先頭 | `1` | `p > 0` |
//! | 先頭側の省略記号 | `…` | `p > 2` |
//! | 前へ | `p` | `p > 1` |
//! | 現在 | `p+1` | 常に |
//! | 次へ | `p+2` | `p < T-1` |
//! | 末尾側の省略記号 | `…` | `p < T-3` |
//! | 末尾 | `T` | `p < T-2` |
//!
//! 結果は `1 … 4 [5] 6 … 20` のような窓付きページネーションになる。
//! 符号なし整数のアンダーフローを避けるため、比較は `p + k < T` の形で行う。

use std::fmt::Write as _;

/// 省略記号のラベル
pub const ELLIPSIS: &str = "…";

/// コントロールの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    First,
    LeadingEllipsis,
    Previous,
    Current,
    Next,
    TrailingEllipsis,
    Last,
}

/// ページ送りボタン 1 つ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub kind:   ControlKind,
    /// 遷移先のページ（0 始まり）。省略記号は `None` で、押下できない
    pub target: Option<u64>,
}

impl PageControl {
    fn page(kind: ControlKind, target: u64) -> Self {
        Self {
            kind,
            target: Some(target),
        }
    }

    fn ellipsis(kind: ControlKind) -> Self {
        Self { kind, target: None }
    }

    /// 表示ラベル（1 始まりのページ番号、または省略記号）
    pub fn label(&self) -> String {
        match self.target {
            Some(target) => (target + 1).to_string(),
            None => ELLIPSIS.to_string(),
        }
    }

    /// 現在ページを示すアクティブなボタンか
    pub fn is_active(&self) -> bool {
        self.kind == ControlKind::Current
    }

    /// 押下可能か（省略記号以外）
    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }
}

/// ページ送りボタンを算出する
///
/// `page` は保持している `Pageable.page`（未指定なら 0 として渡す）。
/// 範囲外の `page` も検証せずそのまま描画する。
pub fn render_controls(total: u64, page: u64) -> Vec<PageControl> {
    let p = page;
    let mut controls = Vec::with_capacity(7);

    if p > 0 {
        controls.push(PageControl::page(ControlKind::First, 0));
    }
    if p > 2 {
        controls.push(PageControl::ellipsis(ControlKind::LeadingEllipsis));
    }
    if p > 1 {
        controls.push(PageControl::page(ControlKind::Previous, p - 1));
    }

    controls.push(PageControl::page(ControlKind::Current, p));

    if p.saturating_add(1) < total {
        controls.push(PageControl::page(ControlKind::Next, p + 1));
    }
    if p.saturating_add(3) < total {
        controls.push(PageControl::ellipsis(ControlKind::TrailingEllipsis));
    }
    if p.saturating_add(2) < total {
        controls.push(PageControl::page(ControlKind::Last, total - 1));
    }

    controls
}

/// コントロールを 1 行のテキストに整形する（現在ページは `[]` で囲む）
pub fn render_bar(controls: &[PageControl]) -> String {
    let mut bar = String::new();
    for (i, control) in controls.iter().enumerate() {
        if i > 0 {
            bar.push(' ');
        }
        if control.is_active() {
            let _ = write!(bar, "[{}]", control.label());
        } else {
            bar.push_str(&control.label());
        }
    }
    bar
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn kinds(controls: &[PageControl]) -> Vec<ControlKind> {
        controls.iter().map(|c| c.kind).collect()
    }

    fn labels(controls: &[PageControl]) -> Vec<String> {
        controls.iter().map(PageControl::label).collect()
    }

    #[test]
    fn test_1ページだけなら現在ページのみ() {
        let controls = render_controls(1, 0);

        assert_eq!(kinds(&controls), vec![ControlKind::Current]);
        assert_eq!(labels(&controls), vec!["1"]);
    }

    #[test]
    fn test_10ページ中の先頭ページ() {
        let controls = render_controls(10, 0);

        assert_eq!(
            kinds(&controls),
            vec![
                ControlKind::Current,
                ControlKind::Next,
                ControlKind::TrailingEllipsis,
                ControlKind::Last,
            ]
        );
        assert_eq!(labels(&controls), vec!["1", "2", "…", "10"]);
    }

    #[test]
    fn test_10ページ中の最終ページ() {
        let controls = render_controls(10, 9);

        assert_eq!(
            kinds(&controls),
            vec![
                ControlKind::First,
                ControlKind::LeadingEllipsis,
                ControlKind::Previous,
                ControlKind::Current,
            ]
        );
        assert_eq!(labels(&controls), vec!["1", "…", "9", "10"]);
    }

    #[test]
    fn test_中央のページは両側に省略記号() {
        let controls = render_controls(20, 4);

        assert_eq!(render_bar(&controls), "1 … 4 [5] 6 … 20");
    }

    #[rstest]
    #[case(5, 1, "1 [2] 3 … 5")]
    #[case(5, 2, "1 2 [3] 4 5")]
    #[case(5, 3, "1 … 3 [4] 5")]
    #[case(2, 1, "1 [2]")]
    #[case(3, 1, "1 [2] 3")]
    fn test_端に近いページでは省略記号を出さない(
        #[case] total: u64,
        #[case] page: u64,
        #[case] expected: &str,
    ) {
        assert_eq!(render_bar(&render_controls(total, page)), expected);
    }

    #[test]
    fn test_0ページでも現在ページは描画する() {
        assert_eq!(kinds(&render_controls(0, 0)), vec![ControlKind::Current]);
    }

    #[test]
    fn test_省略記号は押下できない() {
        let controls = render_controls(20, 10);

        for control in &controls {
            let is_ellipsis = matches!(
                control.kind,
                ControlKind::LeadingEllipsis | ControlKind::TrailingEllipsis
            );
            assert_eq!(control.is_enabled(), !is_ellipsis);
        }
    }

    #[test]
    fn test_全ての組み合わせでラベルは範囲内かつ現在ページは1つ() {
        for total in 1..=30u64 {
            for page in 0..total {
                let controls = render_controls(total, page);

                let active: Vec<_> = controls.iter().filter(|c| c.is_active()).collect();
                assert_eq!(active.len(), 1, "total={total} page={page}");
                assert_eq!(active[0].label(), (page + 1).to_string());

                for control in controls.iter().filter(|c| c.is_enabled()) {
                    let label: u64 = control.label().parse().unwrap();
                    assert!(
                        (1..=total).contains(&label),
                        "total={total} page={page} label={label}"
                    );
                }

                let mut targets: Vec<_> = controls.iter().filter_map(|c| c.target).collect();
                let len = targets.len();
                targets.dedup();
                assert_eq!(targets.len(), len, "ページが重複している: total={total} page={page}");
            }
        }
    }

    #[test]
    fn test_範囲外のページもそのまま描画する() {
        let controls = render_controls(3, 7);

        assert_eq!(labels(&controls), vec!["1", "…", "7", "8"]);
    }
}
