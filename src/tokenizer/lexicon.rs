// Exclusion vocabularies shared by scoring and similarity tokenization

/// Generic wiki vocabulary that says nothing about the topic of an edit
pub const STOPWORDS: &[&str] = &[
    "wikipedia",
    "wikiproject",
    "project",
    "article",
    "articles",
    "editor",
    "editors",
    "edited",
    "update",
    "updates",
    "revised",
    "revision",
    "page",
    "pages",
    "talk",
    "section",
    "content",
    "reference",
    "references",
    "citation",
    "citations",
    "category",
    "categories",
    "template",
    "templates",
];

/// High-churn maintenance terms (deletion discussions, bots, banners)
pub const ADMIN_TERMS: &[&str] = &[
    "talk",
    "draft",
    "notification",
    "redirects",
    "discussion",
    "rfd",
    "afd",
    "template",
    "category",
    "wikidata",
    "citation",
    "references",
    "log",
    "banner",
];

/// True when a lowercase word belongs to either exclusion set
pub fn is_excluded(word: &str) -> bool {
    STOPWORDS.contains(&word) || ADMIN_TERMS.contains(&word)
}
