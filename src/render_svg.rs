//! Static SVG export of a laid-out tree, for previews and print.

use crate::branch_colors::{CLAN_BASE_COLOR, branch_color};
use crate::layout::{LayoutParameters, TreeLayout};
use crate::member::{FamilyMember, Gender};
use crate::pedigree::Pedigree;
use svg::Document;
use svg::node::element::{Line, Rectangle, Text};

const MARGIN: f32 = 140.0;
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

pub fn export_tree_svg(
    pedigree: &Pedigree,
    layout: &TreeLayout,
    parameters: &LayoutParameters,
) -> String {
    let title = match pedigree.members().first().and_then(|m| m.name.chars().next()) {
        Some(surname) => format!("{surname}氏族谱"),
        None => "族谱".to_string(),
    };

    let Some((min, max)) = layout.bounds() else {
        return Document::new()
            .set("viewBox", (0.0, 0.0, 400.0, 200.0))
            .set("style", "background:#ffffff")
            .add(title_text(&title, 24.0, 44.0))
            .to_string();
    };

    let x0 = min.x - MARGIN;
    let y0 = min.y - MARGIN;
    let width = (max.x - min.x) + parameters.node_width + 2.0 * MARGIN;
    let height = (max.y - min.y) + parameters.node_height + 2.0 * MARGIN;

    let mut doc = Document::new()
        .set("viewBox", (x0, y0, width, height))
        .set("width", width)
        .set("height", height)
        .set("style", "background:#ffffff");

    doc = doc.add(title_text(&title, x0 + 24.0, y0 + 44.0));

    // Generation markers down the left margin.
    for band in layout.bands() {
        doc = doc.add(
            Text::new(band.label.clone())
                .set("x", x0 + 20.0)
                .set("y", band.y + parameters.node_height / 2.0)
                .set("dominant-baseline", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", 18)
                .set("fill", "#8a8a8a"),
        );
    }

    // Edges first so the node cards cover the line ends.
    for edge in layout.edges() {
        let Some(from) = layout.position_of(edge.from) else {
            continue;
        };
        let Some(to) = layout.position_of(edge.to) else {
            continue;
        };
        doc = doc.add(
            Line::new()
                .set("x1", from.x + parameters.node_width / 2.0)
                .set("y1", from.y + parameters.node_height)
                .set("x2", to.x + parameters.node_width / 2.0)
                .set("y2", to.y)
                .set("stroke", "#8a8a8a")
                .set("stroke-width", 1.5),
        );
    }

    for member in pedigree.members() {
        let Some(position) = layout.position_of(member.id) else {
            continue;
        };
        let fill = branch_color(CLAN_BASE_COLOR, pedigree.generation_offset(member));
        let mut card = Rectangle::new()
            .set("x", position.x)
            .set("y", position.y)
            .set("width", parameters.node_width)
            .set("height", parameters.node_height)
            .set("rx", 8)
            .set("fill", fill)
            .set("stroke", gender_stroke(member))
            .set("stroke-width", 2);
        if !member.is_alive {
            card = card.set("opacity", 0.7);
        }
        doc = doc.add(card);

        let center_x = position.x + parameters.node_width / 2.0;
        doc = doc.add(
            Text::new(member.name.clone())
                .set("x", center_x)
                .set("y", position.y + parameters.node_height / 2.0 - 8.0)
                .set("text-anchor", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", 16)
                .set("fill", "#ffffff"),
        );
        if let Some(dates) = life_dates(member) {
            doc = doc.add(
                Text::new(dates)
                    .set("x", center_x)
                    .set("y", position.y + parameters.node_height / 2.0 + 14.0)
                    .set("text-anchor", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", 11)
                    .set("fill", "#e8e8e8"),
            );
        }
    }

    doc.to_string()
}

fn title_text(title: &str, x: f32, y: f32) -> Text {
    Text::new(title.to_string())
        .set("x", x)
        .set("y", y)
        .set("font-family", FONT_FAMILY)
        .set("font-size", 24)
        .set("fill", "#202020")
}

// Border color mirrors the on-screen cards: blue for men, pink for women.
fn gender_stroke(member: &FamilyMember) -> &'static str {
    match member.gender {
        Some(Gender::Male) => "#60a5fa",
        Some(Gender::Female) => "#f472b6",
        _ => "#9ca3af",
    }
}

fn life_dates(member: &FamilyMember) -> Option<String> {
    match (member.birth_date, member.death_date) {
        (Some(birth), Some(death)) => Some(format!("{birth} - {death}")),
        (Some(birth), None) => Some(format!("{birth} -")),
        (None, Some(death)) => Some(format!("- {death}")),
        (None, None) => None,
    }
}
