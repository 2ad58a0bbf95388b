use std::fmt;

/// A decoded postback payload, `"<kind>:<arg1>[:<arg2>]"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionToken {
    /// `brands:<service>:<page>` lists one page of brands for a service.
    Brands {
        /// Service the brands belong to.
        service_type: String,
        /// 1-based page number.
        page: u32,
    },
    /// `departments:<storeId>` lists a store's departments.
    Departments {
        /// Store to list.
        store_id: String,
    },
    /// `products:<departmentId>` lists a department's products.
    Products {
        /// Department to list.
        department_id: String,
    },
    /// `search:<storeId>` selects the store that free text searches in.
    Search {
        /// Store to search in.
        store_id: String,
    },
    /// `buy_product:<productId>` is emitted on product cards; no checkout exists.
    BuyProduct {
        /// Product on the card.
        product_id: String,
    },
}

impl ActionToken {
    /// Decode a postback payload.
    ///
    /// Returns `None` for unknown kinds, missing or empty arguments, and
    /// brand pages that are not a positive integer. Trailing segments are
    /// ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split(':').collect();
        let token = match parts.as_slice() {
            ["brands", service, page, ..] if !service.is_empty() => {
                let page = page.parse::<u32>().ok().filter(|p| *p > 0)?;
                Self::Brands {
                    service_type: (*service).to_string(),
                    page,
                }
            }
            ["departments", id, ..] if !id.is_empty() => Self::Departments {
                store_id: (*id).to_string(),
            },
            ["products", id, ..] if !id.is_empty() => Self::Products {
                department_id: (*id).to_string(),
            },
            ["search", id, ..] if !id.is_empty() => Self::Search {
                store_id: (*id).to_string(),
            },
            ["buy_product", id, ..] if !id.is_empty() => Self::BuyProduct {
                product_id: (*id).to_string(),
            },
            _ => return None,
        };
        Some(token)
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brands { service_type, page } => write!(f, "brands:{service_type}:{page}"),
            Self::Departments { store_id } => write!(f, "departments:{store_id}"),
            Self::Products { department_id } => write!(f, "products:{department_id}"),
            Self::Search { store_id } => write!(f, "search:{store_id}"),
            Self::BuyProduct { product_id } => write!(f, "buy_product:{product_id}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brands() {
        assert_eq!(
            ActionToken::parse("brands:groceries:1"),
            Some(ActionToken::Brands {
                service_type: "groceries".into(),
                page: 1
            })
        );
    }

    #[test]
    fn test_parse_single_argument_kinds() {
        assert_eq!(
            ActionToken::parse("departments:11150"),
            Some(ActionToken::Departments {
                store_id: "11150".into()
            })
        );
        assert_eq!(
            ActionToken::parse("products:77"),
            Some(ActionToken::Products {
                department_id: "77".into()
            })
        );
        assert_eq!(
            ActionToken::parse("search:1150"),
            Some(ActionToken::Search {
                store_id: "1150".into()
            })
        );
        assert_eq!(
            ActionToken::parse("buy_product:900"),
            Some(ActionToken::BuyProduct {
                product_id: "900".into()
            })
        );
    }

    #[test]
    fn test_unknown_and_malformed_are_rejected() {
        for raw in [
            "",
            "foo:bar",
            "brands",
            "brands:groceries",
            "brands:groceries:two",
            "brands:groceries:0",
            "brands::1",
            "search",
            "search:",
            "GET_STARTED",
        ] {
            assert_eq!(ActionToken::parse(raw), None, "{raw:?} should be inert");
        }
    }

    #[test]
    fn test_display_matches_wire_format() {
        let token = ActionToken::Brands {
            service_type: "food".into(),
            page: 4,
        };
        assert_eq!(token.to_string(), "brands:food:4");
        assert_eq!(ActionToken::parse(&token.to_string()), Some(token));
    }
}
