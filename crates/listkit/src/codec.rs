//! Mapping between list specifications and remote entities

use crate::types::{ListEntity, ListItem, ListSpecification};

/// Build the payload for creating a list, items included
pub fn creation_payload(spec: &ListSpecification) -> ListEntity {
    ListEntity {
        items: spec.items.iter().map(ListItem::new).collect(),
        ..scalar_payload(String::new(), spec)
    }
}

/// Build the payload for updating list `id`
///
/// Only scalar fields are sent. Items change through patches.
pub fn update_payload(id: &str, spec: &ListSpecification) -> ListEntity {
    scalar_payload(id.to_string(), spec)
}

fn scalar_payload(id: String, spec: &ListSpecification) -> ListEntity {
    ListEntity {
        id,
        name: spec.name.clone(),
        classification: spec.classification,
        description: spec.description.clone(),
        items: Vec::new(),
        count: 0,
        created_at: None,
        updated_at: None,
    }
}

/// Bare item values, in remote order
pub fn item_values(items: &[ListItem]) -> Vec<String> {
    items.iter().map(|item| item.value.clone()).collect()
}

/// Rebuild a specification from a fetched entity and its items
pub fn to_specification(owner_id: &str, entity: &ListEntity, items: &[ListItem]) -> ListSpecification {
    ListSpecification {
        owner_id: owner_id.to_string(),
        name: entity.name.clone(),
        classification: entity.classification,
        description: entity.description.clone(),
        items: item_values(items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Classification;
    use chrono::Utc;

    fn spec() -> ListSpecification {
        ListSpecification {
            owner_id: "acct".into(),
            name: "blocked".into(),
            classification: Classification::Domain,
            description: "bad domains".into(),
            items: vec!["a.example".into(), "b.example".into()],
        }
    }

    #[test]
    fn test_creation_payload_carries_items() {
        let payload = creation_payload(&spec());
        assert!(payload.id.is_empty());
        assert_eq!(payload.name, "blocked");
        assert_eq!(payload.classification, Classification::Domain);
        assert_eq!(item_values(&payload.items), spec().items);
    }

    #[test]
    fn test_update_payload_omits_items() {
        let payload = update_payload("l1", &spec());
        assert_eq!(payload.id, "l1");
        assert_eq!(payload.description, "bad domains");
        assert!(payload.items.is_empty());
    }

    #[test]
    fn test_to_specification_discards_item_metadata() {
        let entity = ListEntity {
            id: "l1".into(),
            ..creation_payload(&spec())
        };
        let items = vec![
            ListItem {
                value: "z.example".into(),
                created_at: Some(Utc::now()),
            },
            ListItem::new("a.example"),
        ];

        let back = to_specification("acct", &entity, &items);
        assert_eq!(back.owner_id, "acct");
        assert_eq!(back.name, "blocked");
        assert_eq!(back.items, vec!["z.example".to_string(), "a.example".to_string()]);
    }
}
