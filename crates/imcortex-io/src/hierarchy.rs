//! Group and name selection hierarchy
//!
//! Border, foci and volume label files organise their items as groups
//! (classes) of names. Each level carries a selection flag that controls
//! display and that is saved to scenes.

use serde::{Deserialize, Serialize};

use imcortex_scene::SceneClass;

/// A name within a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyName {
    pub name: String,
    pub selected: bool,
}

/// A group of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyGroup {
    pub name: String,
    pub selected: bool,
    pub names: Vec<HierarchyName>,
}

impl HierarchyGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            selected: true,
            names: Vec::new(),
        }
    }

    fn name_mut(&mut self, name: &str) -> Option<&mut HierarchyName> {
        self.names.iter_mut().find(|n| n.name == name)
    }
}

/// Two-level selection hierarchy with an overall flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAndNameHierarchy {
    selected: bool,
    groups: Vec<HierarchyGroup>,
}

impl Default for GroupAndNameHierarchy {
    fn default() -> Self {
        Self {
            selected: true,
            groups: Vec::new(),
        }
    }
}

impl GroupAndNameHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the file's current (group, name) items.
    ///
    /// Items already present keep their selection; new items are selected.
    pub fn update<'a>(&mut self, items: impl IntoIterator<Item = (&'a str, &'a str)>) {
        let previous = std::mem::take(&mut self.groups);
        for (group_name, name) in items {
            let group_pos = match self.groups.iter().position(|g| g.name == group_name) {
                Some(pos) => pos,
                None => {
                    let mut group = HierarchyGroup::new(group_name);
                    if let Some(old) = previous.iter().find(|g| g.name == group_name) {
                        group.selected = old.selected;
                    }
                    self.groups.push(group);
                    self.groups.len() - 1
                }
            };
            let group = &mut self.groups[group_pos];
            if group.names.iter().any(|n| n.name == name) {
                continue;
            }
            let selected = previous
                .iter()
                .find(|g| g.name == group_name)
                .and_then(|g| g.names.iter().find(|n| n.name == name))
                .map_or(true, |n| n.selected);
            group.names.push(HierarchyName {
                name: name.to_string(),
                selected,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[HierarchyGroup] {
        &self.groups
    }

    pub fn is_hierarchy_selected(&self) -> bool {
        self.selected
    }

    /// Set every flag at every level
    pub fn set_all_selected(&mut self, selected: bool) {
        self.selected = selected;
        for group in &mut self.groups {
            group.selected = selected;
            for name in &mut group.names {
                name.selected = selected;
            }
        }
    }

    /// True if the hierarchy, the group and the name are all selected
    pub fn is_selected(&self, group: &str, name: &str) -> bool {
        self.selected
            && self
                .groups
                .iter()
                .find(|g| g.name == group)
                .filter(|g| g.selected)
                .and_then(|g| g.names.iter().find(|n| n.name == name))
                .is_some_and(|n| n.selected)
    }

    pub fn set_group_selected(&mut self, group: &str, selected: bool) {
        if let Some(g) = self.groups.iter_mut().find(|g| g.name == group) {
            g.selected = selected;
        }
    }

    pub fn set_selected(&mut self, group: &str, name: &str, selected: bool) {
        if let Some(n) = self
            .groups
            .iter_mut()
            .find(|g| g.name == group)
            .and_then(|g| g.name_mut(name))
        {
            n.selected = selected;
        }
    }

    /// Number of selected names across all groups
    pub fn selected_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.names.iter())
            .filter(|n| n.selected)
            .count()
    }

    pub fn save_to_scene(&self, instance_name: &str) -> SceneClass {
        let mut class = SceneClass::new(instance_name, "GroupAndNameHierarchyModel", 1);
        class.add_boolean("selected", self.selected);
        let groups = self
            .groups
            .iter()
            .map(|g| {
                let mut group_class = SceneClass::new(g.name.as_str(), "GroupAndNameHierarchyGroup", 1);
                group_class.add_boolean("selected", g.selected);
                let names: Vec<String> = g.names.iter().map(|n| n.name.clone()).collect();
                let flags: Vec<bool> = g.names.iter().map(|n| n.selected).collect();
                group_class.add_string_array("names", &names);
                group_class.add_boolean_array("nameSelected", &flags);
                group_class
            })
            .collect();
        class.add_class_array("groups", groups);
        class
    }

    /// Apply saved selection to the items that exist now; saved items that
    /// no longer exist are ignored
    pub fn restore_from_scene(&mut self, class: &SceneClass) {
        self.selected = class.get_boolean_value("selected", self.selected);
        let Some(saved_groups) = class.get_class_array("groups") else {
            return;
        };
        for saved in saved_groups {
            let Some(group) = self.groups.iter_mut().find(|g| g.name == saved.name()) else {
                continue;
            };
            group.selected = saved.get_boolean_value("selected", group.selected);
            let names = saved.get_string_array_value("names");
            let flags = saved.get_boolean_array_value("nameSelected");
            for (name, flag) in names.iter().zip(flags) {
                if let Some(n) = group.name_mut(name) {
                    n.selected = flag;
                }
            }
        }
    }
}
