use fintrack_domain::Categorized;

pub struct CategoryService;

impl CategoryService {
    /// Categories used by `records`, trimmed and de-duplicated in first-seen order.
    pub fn distinct<'a, T, I>(records: I) -> Vec<String>
    where
        T: Categorized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut categories = Vec::new();
        for record in records {
            if let Some(category) = record.category() {
                Self::add(&mut categories, category);
            }
        }
        categories
    }

    /// Appends `candidate` when it is non-blank and not yet listed.
    pub fn add(categories: &mut Vec<String>, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        if trimmed.is_empty() || categories.iter().any(|existing| existing == trimmed) {
            return false;
        }
        categories.push(trimmed.to_string());
        true
    }
}
