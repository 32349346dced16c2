// Per-side tag cloud built from the picked champions' roster tags.

use serde::Serialize;

use super::roster::{ChampionEntry, Roster};

/// Tag colour group. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Gameplay,
    Spike,
    Synergy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub slug: String,
    pub text: String,
    pub category: TagCategory,
}

/// A deduplicated tag with the number of picks carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub slug: String,
    pub text: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagGroup {
    pub category: TagCategory,
    pub tags: Vec<TagCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagCloud {
    pub groups: Vec<TagGroup>,
}

impl TagCloud {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Normalize a tag label into a slug.
///
/// Parenthesized segments are dropped, every run of characters outside
/// `[a-z0-9]` (after lowercasing) becomes a single `-`, and leading/trailing
/// dashes are trimmed. "🛡️ Tank (Frontline)" -> "tank".
pub fn slugify_tag(tag: &str) -> String {
    let lower = tag.to_lowercase();
    let mut without_parens = String::with_capacity(lower.len());
    let mut rest = lower.as_str();
    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                without_parens.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    without_parens.push_str(rest);

    let mut out = String::with_capacity(without_parens.len());
    let mut pending_dash = false;
    for c in without_parens.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Tags of one roster entry, in column order.
pub fn champion_tags(entry: &ChampionEntry) -> Vec<Tag> {
    let mut tags: Vec<Tag> = entry
        .gameplay
        .iter()
        .map(|text| (text, TagCategory::Gameplay))
        .chain(entry.power_spike.iter().map(|t| (t, TagCategory::Spike)))
        .chain(entry.synergy_focus.iter().map(|t| (t, TagCategory::Synergy)))
        .map(|(text, category)| Tag {
            slug: slugify_tag(text),
            text: text.clone(),
            category,
        })
        .collect();
    tags.retain(|t| !t.slug.is_empty());
    tags
}

/// Build the tag cloud for a set of picked champions (display names).
///
/// Tags are deduplicated by slug within their category; the first text seen
/// is kept and occurrences are counted. Champions missing from the roster
/// contribute nothing.
pub fn tag_cloud<'a, I>(roster: &Roster, champions: I) -> TagCloud
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: Vec<TagGroup> = Vec::new();

    for champion in champions {
        let Some(entry) = roster.get(champion) else {
            continue;
        };
        for tag in champion_tags(entry) {
            let idx = match groups.iter().position(|g| g.category == tag.category) {
                Some(idx) => idx,
                None => {
                    groups.push(TagGroup {
                        category: tag.category,
                        tags: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            match group.tags.iter_mut().find(|t| t.slug == tag.slug) {
                Some(existing) => existing.count += 1,
                None => group.tags.push(TagCount {
                    slug: tag.slug,
                    text: tag.text,
                    count: 1,
                }),
            }
        }
    }

    groups.sort_by_key(|g| g.category);
    TagCloud { groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_examples() {
        assert_eq!(slugify_tag("Two Items"), "two-items");
        assert_eq!(slugify_tag("🛡️ Tank (Frontline)"), "tank");
        assert_eq!(slugify_tag("Scaling + Teamfight"), "scaling-teamfight");
        assert_eq!(slugify_tag("  Pick-offs!! "), "pick-offs");
        assert_eq!(slugify_tag("Zone (control"), "zone-control");
        assert_eq!(slugify_tag("(only parens)"), "");
        assert_eq!(slugify_tag(""), "");
    }

    fn roster() -> Roster {
        let csv = "\
Champion,Gameplay1,Gameplay2,Power Spike,Synergy Focus
Ahri,Pick-offs,Roamer,Two Items,Engage
Zed,Pick-offs,Diver,Two Items,
Leona,Engage,Tank,First Item,⚔️ Engage
";
        Roster::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn cloud_counts_and_orders_groups() {
        let roster = roster();
        let cloud = tag_cloud(&roster, ["Zed", "Ahri", "Leona"]);
        let cats: Vec<TagCategory> = cloud.groups.iter().map(|g| g.category).collect();
        assert_eq!(
            cats,
            vec![TagCategory::Gameplay, TagCategory::Spike, TagCategory::Synergy]
        );

        let gameplay = &cloud.groups[0].tags;
        assert_eq!(gameplay[0].slug, "pick-offs");
        assert_eq!(gameplay[0].count, 2);
        let slugs: Vec<&str> = gameplay.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["pick-offs", "diver", "roamer", "engage", "tank"]);

        let spike = &cloud.groups[1].tags;
        assert_eq!(spike[0].slug, "two-items");
        assert_eq!(spike[0].count, 2);

        // "Engage" and "⚔️ Engage" share a slug; the first text wins.
        let synergy = &cloud.groups[2].tags;
        assert_eq!(synergy.len(), 1);
        assert_eq!(synergy[0].text, "Engage");
        assert_eq!(synergy[0].count, 2);
    }

    #[test]
    fn same_slug_in_different_categories_is_not_merged() {
        let roster = roster();
        let cloud = tag_cloud(&roster, ["Leona"]);
        let engage_groups = cloud
            .groups
            .iter()
            .filter(|g| g.tags.iter().any(|t| t.slug == "engage"))
            .count();
        assert_eq!(engage_groups, 2);
    }

    #[test]
    fn empty_and_unknown_picks_give_empty_cloud() {
        let roster = roster();
        assert!(tag_cloud(&roster, Vec::<&str>::new()).is_empty());
        assert!(tag_cloud(&roster, ["Nobody"]).is_empty());
    }
}
