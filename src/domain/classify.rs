use super::marker::is_placeholder;
use super::segment::Segment;
use std::collections::BTreeMap;

/// Tag bucket for segments with real content but no hashtag.
pub const UNCATEGORIZED_TAG: &str = "uncategorized";

/// Fixed category set for the stats panel.
///
/// Declaration order is priority order: when content matches keywords from
/// several categories, the earliest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    WorkStudy,
    Reading,
    Distraction,
    Exercise,
    Sleep,
    Commute,
    Rest,
    Other,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::WorkStudy => "work/study",
            Category::Reading => "reading",
            Category::Distraction => "distraction",
            Category::Exercise => "exercise",
            Category::Sleep => "sleep",
            Category::Commute => "commute",
            Category::Rest => "rest",
            Category::Other => "other",
        }
    }
}

/// Ordered keyword rule table. Content is lower-cased and tested against
/// each row top-down; the first row with a matching substring wins.
///
/// The keyword sets carry the original Chinese vocabulary plus a few English
/// equivalents; extending a category is a data edit, not a code change.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::WorkStudy,
        &[
            "学习", "上课", "作业", "开会", "工作", "写代码", "实验", "调参", "debug", "写文档",
            "写报告", "写论文", "写邮件", "coding", "study", "meeting",
        ],
    ),
    (Category::Reading, &["阅读", "看书", "reading"]),
    (
        Category::Distraction,
        &["摸鱼", "游戏", "娱乐", "走神", "发呆", "神秘的条", "开发", "gaming", "youtube"],
    ),
    (Category::Exercise, &["运动", "健身", "跑步", "workout", "gym"]),
    (Category::Sleep, &["睡眠", "睡觉", "sleep"]),
    (Category::Commute, &["通勤", "交通", "commute", "subway"]),
    (
        Category::Rest,
        &["休息", "午休", "吃饭", "午睡", "洗漱", "lunch", "break", "nap"],
    ),
];

/// Classify a segment's content into a category.
///
/// Returns `None` for placeholder/empty content, which is excluded from
/// aggregation entirely (not lumped into "other").
pub fn classify(content: &str) -> Option<Category> {
    if is_placeholder(content) {
        return None;
    }

    let lowered = content.to_lowercase();
    for (category, keywords) in RULES {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return Some(*category);
        }
    }
    Some(Category::Other)
}

/// Extract hashtags: `#` followed by one or more word characters.
///
/// Word characters are alphanumerics (Unicode-aware, so CJK tags work) and
/// underscores. Duplicate tags are reported once.
pub fn extract_tags(content: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '#' {
            continue;
        }
        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                tag.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    tags
}

/// Sum segment minutes per category. Placeholder segments contribute nothing.
pub fn aggregate_categories(segments: &[Segment]) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();
    for segment in segments {
        if let Some(category) = classify(&segment.content) {
            *totals.entry(category).or_insert(0.0) += segment.minutes;
        }
    }
    totals
}

/// Sum segment minutes per hashtag.
///
/// A segment's minutes split evenly across its tags; tagless segments with
/// real content fall into the [`UNCATEGORIZED_TAG`] bucket; placeholder
/// segments contribute nothing. Computed independently from the category
/// totals; the two bucket sets are not required to reconcile.
pub fn aggregate_tags(segments: &[Segment]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for segment in segments {
        if is_placeholder(&segment.content) {
            continue;
        }

        let tags = extract_tags(&segment.content);
        if tags.is_empty() {
            *totals.entry(UNCATEGORIZED_TAG.to_string()).or_insert(0.0) += segment.minutes;
        } else {
            let share = segment.minutes / tags.len() as f64;
            for tag in tags {
                *totals.entry(tag).or_insert(0.0) += share;
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(content: &str, minutes: f64) -> Segment {
        Segment {
            start_position: 0.0,
            end_position: 0.0,
            content: content.to_string(),
            minutes,
        }
    }

    #[test]
    fn test_classify_keyword_rules() {
        assert_eq!(classify("写代码 #work"), Some(Category::WorkStudy));
        assert_eq!(classify("摸鱼"), Some(Category::Distraction));
        assert_eq!(classify("去健身房"), Some(Category::Exercise));
        assert_eq!(classify("地铁通勤"), Some(Category::Commute));
        assert_eq!(classify("看书半小时"), Some(Category::Reading));
    }

    #[test]
    fn test_classify_priority_order() {
        // Matches both work/study (开会) and rest (吃饭); work/study wins.
        assert_eq!(classify("开会的时候吃饭"), Some(Category::WorkStudy));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("Debug the parser"), Some(Category::WorkStudy));
        assert_eq!(classify("GYM session"), Some(Category::Exercise));
    }

    #[test]
    fn test_classify_unmatched_and_placeholder() {
        assert_eq!(classify("遛狗"), Some(Category::Other));
        assert_eq!(classify(""), None);
        assert_eq!(classify("   "), None);
        assert_eq!(classify("新事项"), None);
    }

    #[test]
    fn test_extract_tags() {
        assert_eq!(extract_tags("写代码 #work"), vec!["work"]);
        assert_eq!(extract_tags("#工作 then #side_project"), vec!["工作", "side_project"]);
        assert_eq!(extract_tags("no tags here"), Vec::<String>::new());
        // Bare '#' is not a tag; duplicates collapse.
        assert_eq!(extract_tags("# #a #a"), vec!["a"]);
    }

    #[test]
    fn test_aggregate_categories_scenario() {
        // "写代码 #work" over a 6h block, "摸鱼" over 30 minutes.
        let segments = vec![segment("写代码 #work", 360.0), segment("摸鱼", 30.0)];

        let totals = aggregate_categories(&segments);
        assert_eq!(totals[&Category::WorkStudy], 360.0);
        assert_eq!(totals[&Category::Distraction], 30.0);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_aggregate_tags_scenario() {
        let segments = vec![segment("写代码 #work", 360.0), segment("摸鱼", 30.0)];

        let totals = aggregate_tags(&segments);
        assert_eq!(totals["work"], 360.0);
        assert_eq!(totals[UNCATEGORIZED_TAG], 30.0);
    }

    #[test]
    fn test_aggregate_tags_split_evenly() {
        let segments = vec![segment("#a #b", 90.0)];

        let totals = aggregate_tags(&segments);
        assert_eq!(totals["a"], 45.0);
        assert_eq!(totals["b"], 45.0);
    }

    #[test]
    fn test_placeholder_segments_excluded_everywhere() {
        let segments = vec![segment("新事项", 120.0), segment("", 60.0)];

        assert!(aggregate_categories(&segments).is_empty());
        assert!(aggregate_tags(&segments).is_empty());
    }
}
