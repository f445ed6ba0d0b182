//! Limits of particular database management systems.

/// Limits of a DBMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DbmsInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// Max length (inclusive) in bytes of a key used in any index
    pub max_index_key_length: usize,
    /// Max length (inclusive) in utf8 characters of a key used in any index
    pub max_index_key_length_char: usize,
}

impl DbmsInfo {
    /// Whether `key` may be used in an index.
    #[must_use]
    pub fn fits_index_key(&self, key: &str) -> bool {
        key.len() <= self.max_index_key_length
            && key.chars().count() <= self.max_index_key_length_char
    }
}

/// MySQL with the InnoDB storage engine.
///
/// MySQL's `utf8` charset takes up to 3 bytes per character.
pub const MYSQL_INNODB: DbmsInfo = DbmsInfo {
    name: "mysql-innodb",
    version: "5.7",
    max_index_key_length: 765,
    max_index_key_length_char: 765 / 3,
};
