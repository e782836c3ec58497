use std::collections::HashSet;

use serde::Deserialize;

use crate::error::LoadError;

/// Group labels as written in TOML: either a string whose characters are
/// each a group (`"123456789"`) or an explicit list (`["www", "dev"]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GroupsSpec {
    Chars(String),
    Names(Vec<String>),
}

impl Default for GroupsSpec {
    fn default() -> Self {
        Self::Chars("123456789".to_owned())
    }
}

impl GroupsSpec {
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Chars(s) => s.chars().map(String::from).collect(),
            Self::Names(v) => v.clone(),
        }
    }
}

/// A workspace windows can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
}

/// Build the ordered group set, rejecting blank or repeated names.
pub fn build_groups(names: &[String]) -> Result<Vec<Group>, LoadError> {
    let mut seen = HashSet::with_capacity(names.len());
    let mut groups = Vec::with_capacity(names.len());
    for name in names {
        if name.trim().is_empty() {
            return Err(LoadError::InvalidGroup(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(LoadError::DuplicateGroup(name.clone()));
        }
        groups.push(Group { name: name.clone() });
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_split_into_groups() {
        let names = GroupsSpec::default().names();
        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "1");
        assert_eq!(names[8], "9");
    }

    #[test]
    fn duplicate_group_rejected() {
        let names = GroupsSpec::Chars("1231".to_owned()).names();
        assert!(matches!(
            build_groups(&names),
            Err(LoadError::DuplicateGroup(ref g)) if g == "1"
        ));
    }

    #[test]
    fn order_is_preserved() {
        let names = vec!["www".to_owned(), "dev".to_owned(), "chat".to_owned()];
        let groups = build_groups(&names).unwrap();
        let got: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(got, ["www", "dev", "chat"]);
    }
}
