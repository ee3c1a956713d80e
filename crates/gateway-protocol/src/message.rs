//! Tag/value message representation.
//!
//! A [`FixMessage`] is an insertion-ordered map from [`FieldKey`]
//! (tag plus optional repeating-group entry index) to a string value.
//! Setting a key that already exists overwrites the value in place, so
//! duplicate tags outside a group resolve to the last write.
//!
//! The group index only orders entries; two entries are distinct because
//! their indices differ, not because the index carries meaning.

use indexmap::IndexMap;

use crate::tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub tag: u32,
    pub group: Option<u32>,
}

impl FieldKey {
    pub fn top(tag: u32) -> Self {
        FieldKey { tag, group: None }
    }

    pub fn in_group(index: u32, tag: u32) -> Self {
        FieldKey {
            tag,
            group: Some(index),
        }
    }
}

/// A single field, as handed to [`FixMessage::from_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub tag: u32,
    pub value: String,
    pub group: Option<u32>,
}

impl Field {
    pub fn new(tag: u32, value: impl Into<String>) -> Self {
        Field {
            tag,
            value: value.into(),
            group: None,
        }
    }

    pub fn grouped(index: u32, tag: u32, value: impl Into<String>) -> Self {
        Field {
            tag,
            value: value.into(),
            group: Some(index),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixMessage {
    fields: IndexMap<FieldKey, String>,
}

impl FixMessage {
    pub fn new() -> Self {
        FixMessage::default()
    }

    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut msg = FixMessage::new();
        for field in fields {
            msg.fields.insert(
                FieldKey {
                    tag: field.tag,
                    group: field.group,
                },
                field.value,
            );
        }
        msg
    }

    /// Set a top-level field (last write wins).
    pub fn set(&mut self, tag: u32, value: impl ToString) -> &mut Self {
        self.fields.insert(FieldKey::top(tag), value.to_string());
        self
    }

    /// Set a field inside repeating-group entry `index`.
    pub fn set_group(&mut self, index: u32, tag: u32, value: impl ToString) -> &mut Self {
        self.fields
            .insert(FieldKey::in_group(index, tag), value.to_string());
        self
    }

    /// Top-level value of `tag`.
    pub fn get(&self, tag: u32) -> Option<&str> {
        self.fields.get(&FieldKey::top(tag)).map(String::as_str)
    }

    /// Value of `tag` inside group entry `index`.
    pub fn get_group(&self, index: u32, tag: u32) -> Option<&str> {
        self.fields
            .get(&FieldKey::in_group(index, tag))
            .map(String::as_str)
    }

    /// Top-level value by FIX field name, e.g. `get_by_name("Symbol")`.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        tags::by_name(name).and_then(|tag| self.get(tag))
    }

    pub fn msg_type(&self) -> Option<&str> {
        self.get(tags::MSG_TYPE)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Distinct group entry indices, ascending.
    pub fn group_indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.fields.keys().filter_map(|k| k.group).collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Fields of group entry `index`, ascending by tag.
    pub fn group_entry(&self, index: u32) -> Vec<(u32, &str)> {
        let mut entry: Vec<(u32, &str)> = self
            .fields
            .iter()
            .filter(|(k, _)| k.group == Some(index))
            .map(|(k, v)| (k.tag, v.as_str()))
            .collect();
        entry.sort_unstable_by_key(|(tag, _)| *tag);
        entry
    }

    /// Serialize with [`crate::codec::encode`].
    pub fn encode(&self) -> Vec<u8> {
        crate::codec::encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_tag_last_write_wins() {
        let mut msg = FixMessage::new();
        msg.set(tags::SYMBOL, "AAPL").set(tags::SYMBOL, "MSFT");
        assert_eq!(msg.get(tags::SYMBOL), Some("MSFT"));
        assert_eq!(msg.len(), 1);
    }

    #[test]
    fn group_fields_do_not_collide_with_top_level() {
        let msg = FixMessage::from_fields([
            Field::new(tags::NO_MD_ENTRIES, "2"),
            Field::grouped(0, tags::MD_ENTRY_PX, "1.5"),
            Field::grouped(1, tags::MD_ENTRY_PX, "1.6"),
            Field::grouped(1, tags::MD_ENTRY_TYPE, "1"),
        ]);
        assert_eq!(msg.get(tags::MD_ENTRY_PX), None);
        assert_eq!(msg.get_group(0, tags::MD_ENTRY_PX), Some("1.5"));
        assert_eq!(msg.group_indices(), vec![0, 1]);
        assert_eq!(
            msg.group_entry(1),
            vec![(tags::MD_ENTRY_TYPE, "1"), (tags::MD_ENTRY_PX, "1.6")]
        );
    }

    #[test]
    fn lookup_by_name() {
        let mut msg = FixMessage::new();
        msg.set(tags::MSG_TYPE, "A").set(tags::HEART_BT_INT, 30);
        assert_eq!(msg.get_by_name("MsgType"), Some("A"));
        assert_eq!(msg.get_by_name("HeartBtInt"), Some("30"));
        assert_eq!(msg.get_by_name("Bogus"), None);
        assert_eq!(msg.msg_type(), Some("A"));
    }
}
