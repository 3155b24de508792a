//! Text rendering of a company structure.
//!
//! Layers become boxed labels stacked top to bottom; a row splits the
//! available width between its children. The output is plain `Line`s so
//! it can be wrapped in any widget.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use rechtsform_core::{Category, Layer, Liability, NodeId, StructuralNode};

pub const UNLIMITED_MARKER: char = '▼';
pub const LIMITED_MARKER: char = '▽';

const PLAIN_BORDER: char = '─';

#[derive(Debug, Clone, Copy)]
pub struct CategoryStyle {
    pub color: Color,
    /// Horizontal border used when categories are told apart without color.
    pub pattern: char,
}

static CATEGORY_STYLES: Lazy<HashMap<Category, CategoryStyle>> = Lazy::new(|| {
    HashMap::from([
        (Category::SupervisoryBoard, CategoryStyle { color: Color::Magenta, pattern: '═' }),
        (Category::Management, CategoryStyle { color: Color::Blue, pattern: '━' }),
        (Category::Shareholder, CategoryStyle { color: Color::Green, pattern: '┄' }),
        (Category::Capital, CategoryStyle { color: Color::Yellow, pattern: '╌' }),
        (Category::Stocks, CategoryStyle { color: Color::LightYellow, pattern: '┈' }),
        (Category::Ship, CategoryStyle { color: Color::Cyan, pattern: '≈' }),
        (Category::InsertedCompany, CategoryStyle { color: Color::LightRed, pattern: '▀' }),
    ])
});

pub fn category_style(category: Category) -> CategoryStyle {
    CATEGORY_STYLES
        .get(&category)
        .copied()
        .unwrap_or(CategoryStyle {
            color: Color::White,
            pattern: PLAIN_BORDER,
        })
}

pub fn liability_marker(liability: Liability) -> Option<char> {
    match liability {
        Liability::Unlimited => Some(UNLIMITED_MARKER),
        Liability::Limited => Some(LIMITED_MARKER),
        Liability::None => None,
    }
}

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicOptions {
    pub patterned: bool,
    pub highlight: Option<NodeId>,
}

/// A rectangular piece of output; every line is exactly `width` cells wide.
struct Block {
    width: usize,
    lines: Vec<Vec<Span<'static>>>,
}

impl Block {
    fn height(&self) -> usize {
        self.lines.len()
    }

    fn pad_to(&mut self, height: usize) {
        while self.lines.len() < height {
            self.lines.push(vec![Span::raw(" ".repeat(self.width))]);
        }
    }
}

/// Render `nodes` into lines at most `width` cells wide.
pub fn render(nodes: &[StructuralNode], width: u16, options: GraphicOptions) -> Vec<Line<'static>> {
    column(nodes, width as usize, options)
        .lines
        .into_iter()
        .map(Line::from)
        .collect()
}

fn column(nodes: &[StructuralNode], width: usize, options: GraphicOptions) -> Block {
    let mut lines = Vec::new();
    for node in nodes {
        lines.extend(node_block(node, width, options).lines);
    }
    Block { width, lines }
}

fn node_block(node: &StructuralNode, width: usize, options: GraphicOptions) -> Block {
    match node {
        StructuralNode::Layer(layer) => layer_box(layer, width, options),
        StructuralNode::Row(row) => {
            let widths = split_width(width, row.children.len());
            let mut parts: Vec<Block> = row
                .children
                .iter()
                .zip(widths)
                .map(|(child, child_width)| node_block(child, child_width, options))
                .collect();
            let height = parts.iter().map(Block::height).max().unwrap_or(0);
            let mut lines = Vec::with_capacity(height);
            for idx in 0..height {
                let mut line = Vec::new();
                for part in parts.iter_mut() {
                    part.pad_to(height);
                    line.extend(part.lines[idx].iter().cloned());
                }
                lines.push(line);
            }
            Block { width, lines }
        }
    }
}

/// Split `width` into `parts` widths; the first ones absorb the remainder.
pub fn split_width(width: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let base = width / parts;
    let remainder = width % parts;
    (0..parts)
        .map(|idx| base + usize::from(idx < remainder))
        .collect()
}

fn layer_box(layer: &Layer, width: usize, options: GraphicOptions) -> Block {
    let style = category_style(layer.category());
    let mut border_style = Style::default().fg(style.color);
    if options.highlight == Some(layer.id) {
        border_style = border_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    let horizontal = if options.patterned {
        style.pattern
    } else {
        PLAIN_BORDER
    };

    let label = match liability_marker(layer.liability) {
        Some(marker) => format!("{marker} {}", layer.label),
        None => layer.label.clone(),
    };

    if width < 3 {
        let text = fit(&label, width);
        return Block {
            width,
            lines: vec![vec![Span::styled(text, border_style)]],
        };
    }

    let inner = width - 2;
    let fill: String = std::iter::repeat(horizontal).take(inner).collect();
    let top = format!("┌{fill}┐");
    let bottom = format!("└{fill}┘");
    let middle = vec![
        Span::styled("│", border_style),
        Span::styled(
            center(&label, inner),
            border_style.add_modifier(Modifier::BOLD),
        ),
        Span::styled("│", border_style),
    ];

    Block {
        width,
        lines: vec![
            vec![Span::styled(top, border_style)],
            middle,
            vec![Span::styled(bottom, border_style)],
        ],
    }
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{text:<width$}");
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

fn center(text: &str, width: usize) -> String {
    let text = fit(text.trim_end(), width);
    let text = text.trim_end();
    let count = text.chars().count();
    let left = (width - count) / 2;
    let right = width - count - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// One legend entry per category that appears in `nodes`, plus the markers.
pub fn legend(nodes: &[StructuralNode], patterned: bool) -> Vec<Line<'static>> {
    let layers: Vec<&Layer> = nodes.iter().flat_map(|node| node.layers()).collect();
    let mut lines: Vec<Line<'static>> = Category::ALL
        .iter()
        .filter(|category| layers.iter().any(|layer| layer.category() == **category))
        .map(|category| {
            let style = category_style(*category);
            let swatch = if patterned {
                format!("{0}{0} ", style.pattern)
            } else {
                "■ ".to_string()
            };
            Line::from(vec![
                Span::styled(swatch, Style::default().fg(style.color)),
                Span::raw(category.title()),
            ])
        })
        .collect();

    for liability in [Liability::Unlimited, Liability::Limited] {
        if !layers.iter().any(|layer| layer.liability == liability) {
            continue;
        }
        if let (Some(marker), Some(title)) = (liability_marker(liability), liability.title()) {
            lines.push(Line::from(format!("{marker}  {title}")));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rechtsform_core::{
        row, structure, CapitalType, Layer, ManagementType, ShareholderType,
    };

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn widths(lines: &[Line]) -> Vec<usize> {
        lines.iter().map(|line| text(line).chars().count()).collect()
    }

    #[test]
    fn layers_stack_vertically() {
        let nodes = structure![
            Layer::management(ManagementType::Management),
            Layer::capital(CapitalType::Capital),
        ];
        let lines = render(&nodes, 20, GraphicOptions::default());
        assert_eq!(lines.len(), 6);
        assert!(widths(&lines).iter().all(|width| *width == 20));
        assert!(text(&lines[1]).contains("Management"));
        assert!(text(&lines[4]).contains("Capital"));
    }

    #[test]
    fn rows_split_width_and_pad_height() {
        let nodes = structure![row![
            Layer::management(ManagementType::Complementary).with_unlimited_liability(),
            row![
                Layer::shareholder(ShareholderType::LimitedPartner).with_limited_liability(),
                Layer::capital(CapitalType::PrivateDeposits),
            ],
        ]];
        let lines = render(&nodes, 41, GraphicOptions::default());
        assert_eq!(lines.len(), 3);
        assert!(widths(&lines).iter().all(|width| *width == 41));
        let middle = text(&lines[1]);
        assert!(middle.contains(UNLIMITED_MARKER));
        assert!(middle.contains(LIMITED_MARKER));
    }

    #[test]
    fn split_width_hands_out_the_remainder_first() {
        assert_eq!(split_width(10, 3), [4, 3, 3]);
        assert_eq!(split_width(10, 0), Vec::<usize>::new());
    }

    #[test]
    fn pattern_mode_changes_borders() {
        let nodes = structure![Layer::supervisory_board()];
        let plain = render(&nodes, 12, GraphicOptions::default());
        let patterned = render(
            &nodes,
            12,
            GraphicOptions {
                patterned: true,
                highlight: None,
            },
        );
        assert!(text(&plain[0]).contains(PLAIN_BORDER));
        assert!(text(&patterned[0]).contains('═'));
    }

    #[test]
    fn long_labels_are_truncated() {
        let nodes = structure![Layer::shareholder_labeled(
            ShareholderType::Shareholder,
            "An unusually long shareholder label"
        )];
        let lines = render(&nodes, 12, GraphicOptions::default());
        assert!(text(&lines[1]).contains('…'));
        assert_eq!(widths(&lines), [12, 12, 12]);
    }

    #[test]
    fn legend_lists_present_categories_and_markers() {
        let nodes = structure![
            Layer::management(ManagementType::Management),
            Layer::shareholder(ShareholderType::Shareholder).with_limited_liability(),
        ];
        let legend: Vec<_> = legend(&nodes, false).iter().map(text).collect();
        assert_eq!(legend.len(), 3);
        assert!(legend[0].ends_with("Management"));
        assert!(legend[1].ends_with("Shareholder"));
        assert!(legend[2].contains("Limited Liability"));
    }
}
