//! Pure filters recomputed by the view on every render.
//!
//! All functions here are total: no error paths, no mutation, no IO. They
//! borrow from the snapshot and return borrowed selections, so recomputation
//! after every state change stays cheap.

use crate::category::{Category, CategoryId};
use crate::product::Product;

/// Categories with at least one matching product, in input category order.
///
/// A category is included iff some product's `category` equals its id; the
/// product scan short-circuits on the first match. Output order is a
/// subsequence of the input category order (never sorted). Empty products or
/// empty categories yield an empty result, not a failure.
///
/// Products are taken as any re-iterable borrowing source, so this runs
/// equally over a snapshot slice and an already-narrowed selection.
pub fn represented_categories<'a, 'p, P>(products: P, categories: &'a [Category]) -> Vec<&'a Category>
where
    P: IntoIterator<Item = &'p Product>,
    P::IntoIter: Clone,
{
    let products = products.into_iter();
    categories
        .iter()
        .filter(|category| products.clone().any(|product| product.category == category.id))
        .collect()
}

/// Products whose `category` equals the given id, in input product order.
pub fn products_in_category<'p, P>(products: P, category: &CategoryId) -> Vec<&'p Product>
where
    P: IntoIterator<Item = &'p Product>,
{
    products
        .into_iter()
        .filter(|product| product.category == *category)
        .collect()
}

/// Products whose display name contains the query, case-insensitively.
///
/// The query is trimmed first; an empty or whitespace-only query narrows
/// nothing and returns every product. This is the upstream search narrowing
/// applied before category filtering and pagination.
pub fn search_by_name<'p, P>(products: P, query: &str) -> Vec<&'p Product>
where
    P: IntoIterator<Item = &'p Product>,
{
    let products = products.into_iter();
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.collect();
    }
    products
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Price, ProductId, Rating};

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: name.to_string(),
        }
    }

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            name: name.to_string(),
            category: CategoryId::new(category).unwrap(),
            price: Price::from_cents(12_000),
            rating: Rating::clamped(4),
            promo: None,
            is_new: false,
            image: String::new(),
        }
    }

    #[test]
    fn includes_only_categories_with_a_matching_product() {
        let categories = vec![category("bed", "Bed"), category("chair", "Chair")];
        let products = vec![product("p-1", "Aenean Ru Bristique", "bed")];

        let represented = represented_categories(&products, &categories);

        assert_eq!(represented.len(), 1);
        assert_eq!(represented[0].id.as_str(), "bed");
    }

    #[test]
    fn preserves_input_category_order() {
        let categories = vec![
            category("sofa", "Sofa"),
            category("bed", "Bed"),
            category("chair", "Chair"),
        ];
        let products = vec![
            product("p-1", "One", "chair"),
            product("p-2", "Two", "sofa"),
        ];

        let represented = represented_categories(&products, &categories);

        let ids: Vec<&str> = represented.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["sofa", "chair"]);
    }

    #[test]
    fn empty_products_yield_empty_output() {
        let categories = vec![category("bed", "Bed")];
        let products: Vec<Product> = vec![];
        assert!(represented_categories(&products, &categories).is_empty());
    }

    #[test]
    fn empty_categories_yield_empty_output() {
        let products = vec![product("p-1", "One", "bed")];
        assert!(represented_categories(&products, &[]).is_empty());
    }

    #[test]
    fn runs_over_an_already_narrowed_selection() {
        let categories = vec![category("bed", "Bed"), category("chair", "Chair")];
        let products = vec![
            product("p-1", "Bristique Bed", "bed"),
            product("p-2", "Plain Chair", "chair"),
        ];

        let narrowed = search_by_name(&products, "bristique");
        let represented = represented_categories(narrowed.iter().copied(), &categories);

        let ids: Vec<&str> = represented.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bed"]);
    }

    #[test]
    fn products_in_category_keeps_order_and_drops_the_rest() {
        let products = vec![
            product("p-1", "One", "bed"),
            product("p-2", "Two", "chair"),
            product("p-3", "Three", "bed"),
        ];
        let bed = CategoryId::new("bed").unwrap();

        let in_bed = products_in_category(&products, &bed);

        let ids: Vec<&str> = in_bed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-1", "p-3"]);
    }

    #[test]
    fn products_in_category_with_no_match_is_empty() {
        let products = vec![product("p-1", "One", "bed")];
        let lamp = CategoryId::new("lamp").unwrap();
        assert!(products_in_category(&products, &lamp).is_empty());
    }

    #[test]
    fn search_matches_case_insensitively() {
        let products = vec![
            product("p-1", "Aenean Ru Bristique", "bed"),
            product("p-2", "Plain Chair", "chair"),
        ];

        let found = search_by_name(&products, "BRIST");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "p-1");
    }

    #[test]
    fn blank_query_returns_everything() {
        let products = vec![
            product("p-1", "One", "bed"),
            product("p-2", "Two", "chair"),
        ];

        assert_eq!(search_by_name(&products, "").len(), 2);
        assert_eq!(search_by_name(&products, "   ").len(), 2);
    }

    #[test]
    fn search_trims_the_query() {
        let products = vec![product("p-1", "Plain Chair", "chair")];
        assert_eq!(search_by_name(&products, "  chair  ").len(), 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const SLUGS: [&str; 6] = ["bed", "chair", "sofa", "table", "lamp", "wardrobe"];

        fn fixed_categories() -> Vec<Category> {
            SLUGS
                .iter()
                .map(|slug| category(slug, slug))
                .collect()
        }

        fn arbitrary_products() -> impl Strategy<Value = Vec<Product>> {
            proptest::collection::vec(0usize..SLUGS.len(), 0..40).prop_map(|choices| {
                choices
                    .into_iter()
                    .enumerate()
                    .map(|(i, slug_index)| {
                        product(&format!("p-{i}"), &format!("Item {i}"), SLUGS[slug_index])
                    })
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: every output category has at least one matching product.
            #[test]
            fn every_output_category_is_represented(products in arbitrary_products()) {
                let categories = fixed_categories();
                let represented = represented_categories(&products, &categories);

                for cat in &represented {
                    prop_assert!(
                        products.iter().any(|p| p.category == cat.id),
                        "category {} has no matching product",
                        cat.id
                    );
                }
            }

            /// Property: output is a subsequence of the input category order.
            #[test]
            fn output_is_a_subsequence_of_input_order(products in arbitrary_products()) {
                let categories = fixed_categories();
                let represented = represented_categories(&products, &categories);

                prop_assert!(represented.len() <= categories.len());

                let positions: Vec<usize> = represented
                    .iter()
                    .map(|cat| {
                        categories
                            .iter()
                            .position(|c| c.id == cat.id)
                            .unwrap()
                    })
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }

            /// Property: search output is a sub-selection whose names all match.
            #[test]
            fn search_output_names_all_contain_the_query(
                products in arbitrary_products(),
                query in "[A-Za-z ]{0,8}",
            ) {
                let found = search_by_name(&products, &query);

                prop_assert!(found.len() <= products.len());
                let needle = query.trim().to_lowercase();
                for p in &found {
                    prop_assert!(p.name.to_lowercase().contains(&needle));
                }
                if needle.is_empty() {
                    prop_assert_eq!(found.len(), products.len());
                }
            }
        }
    }
}
