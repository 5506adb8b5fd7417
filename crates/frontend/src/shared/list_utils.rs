/// Sorting helpers shared by list pages
use std::cmp::Ordering;

/// Types that can be sorted by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Sort in place by the given column
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Case-insensitive comparison for optional text columns; missing sorts first.
pub fn cmp_opt_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    a.unwrap_or("")
        .to_lowercase()
        .cmp(&b.unwrap_or("").to_lowercase())
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        qty: u32,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "qty" => self.qty.cmp(&other.qty),
                _ => self.name.cmp(other.name),
            }
        }
    }

    #[test]
    fn test_sort_list_both_directions() {
        let mut rows = vec![
            Row { name: "b", qty: 2 },
            Row { name: "a", qty: 3 },
            Row { name: "c", qty: 1 },
        ];
        sort_list(&mut rows, "qty", true);
        assert_eq!(rows.iter().map(|r| r.qty).collect::<Vec<_>>(), vec![1, 2, 3]);
        sort_list(&mut rows, "name", false);
        assert_eq!(rows.iter().map(|r| r.name).collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_cmp_opt_text() {
        assert_eq!(cmp_opt_text(None, Some("a")), Ordering::Less);
        assert_eq!(cmp_opt_text(Some("ABC"), Some("abc")), Ordering::Equal);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("qty", "name", true), " ⇅");
    }
}
