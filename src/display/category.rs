//! Category display formatting

use crate::models::Category;

/// Format the category list with ids, so they can be passed to `--category`
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let width = categories
        .iter()
        .map(|c| c.id.as_str().chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::from("Categories:\n");
    for category in categories {
        output.push_str(&format!(
            "  {:width$}  {}  {}\n",
            category.id.as_str(),
            category.color,
            category,
            width = width
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list() {
        let output = format_category_list(&Category::defaults());
        assert!(output.starts_with("Categories:"));
        assert!(output.contains("transport"));
        assert!(output.contains("🚗 Ulaşım"));
    }

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[]).contains("No categories"));
    }
}
