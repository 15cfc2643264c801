//! Sample content written on first run and after clear-all.

use crate::model::category::{Category, CategoryColor, CategoryIcon};
use crate::model::note::{Note, NoteDraft};
use crate::model::ValidationError;

const SAMPLE_CATEGORIES: [(&str, CategoryIcon, CategoryColor); 3] = [
    ("Frontend Development", CategoryIcon::Layout, CategoryColor::Blue),
    ("Backend APIs", CategoryIcon::Server, CategoryColor::Green),
    ("Database", CategoryIcon::Database, CategoryColor::Purple),
];

const GRID_NOTE: &str = "<p>CSS Grid is a powerful layout system available in CSS. It is a 2-dimensional system, meaning it can handle both columns and rows.</p><p>Example:</p><pre>display: grid;<br>grid-template-columns: repeat(3, 1fr);<br>gap: 10px;</pre>";

const REST_NOTE: &str = "<p>RESTful API design best practices:</p><ul><li>Use nouns instead of verbs in endpoint paths</li><li>Use logical nesting on endpoints</li><li>Handle errors gracefully and return appropriate status codes</li><li>Allow filtering, sorting, and pagination</li><li>Maintain good documentation</li></ul>";

const JOINS_NOTE: &str = "<p>Common SQL joins:</p><ul><li><strong>INNER JOIN</strong>: Returns records with matching values in both tables</li><li><strong>LEFT JOIN</strong>: Returns all records from the left table, and matched records from the right table</li><li><strong>RIGHT JOIN</strong>: Returns all records from the right table, and matched records from the left table</li><li><strong>FULL JOIN</strong>: Returns all records when there is a match in either left or right table</li></ul>";

/// Three categories with one note each: the first pinned, the second favorited.
pub fn sample_data(now_ms: i64) -> Result<(Vec<Category>, Vec<Note>), ValidationError> {
    let categories = SAMPLE_CATEGORIES
        .iter()
        .map(|(name, icon, color)| Category::new(name, *icon, *color, now_ms))
        .collect::<Result<Vec<_>, _>>()?;

    let drafts = [
        NoteDraft::new("CSS Grid Layout", GRID_NOTE).pinned(true),
        NoteDraft::new("REST API Best Practices", REST_NOTE).favorite(true),
        NoteDraft::new("SQL Joins Cheatsheet", JOINS_NOTE),
    ];
    let notes = categories
        .iter()
        .zip(drafts)
        .map(|(category, draft)| Note::new(category.id, draft, now_ms))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((categories, notes))
}
