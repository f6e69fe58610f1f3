use super::ManifestIndex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const ENABLED: &str = "enabled";
const PERMISSION: &str = "permission";
const READ_PERMISSION: &str = "readPermission";
const WRITE_PERMISSION: &str = "writePermission";

/// Component categories declared under `<application>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Activity,
    ActivityAlias,
    Service,
    Receiver,
    Provider,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Activity,
        ComponentKind::ActivityAlias,
        ComponentKind::Service,
        ComponentKind::Receiver,
        ComponentKind::Provider,
    ];

    /// Manifest tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Activity => "activity",
            ComponentKind::ActivityAlias => "activity-alias",
            ComponentKind::Service => "service",
            ComponentKind::Receiver => "receiver",
            ComponentKind::Provider => "provider",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown component kind: {}", s))
    }
}

/// Which components of one kind require a permission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentProtection {
    /// Fully qualified class name -> guarding permission
    pub protected: BTreeMap<String, String>,
    /// Fully qualified class names without any permission, in document order
    pub unprotected: Vec<String>,
}

impl ComponentProtection {
    /// Permission guarding a component, if it is protected
    pub fn permission_for(&self, class_name: &str) -> Option<&str> {
        self.protected.get(class_name).map(String::as_str)
    }

    pub fn is_protected(&self, class_name: &str) -> bool {
        self.protected.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.protected.len() + self.unprotected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mark_protected(&mut self, class_name: String, permission: String) {
        self.unprotected.retain(|name| *name != class_name);
        self.protected.insert(class_name, permission);
    }

    fn mark_unprotected(&mut self, class_name: String) {
        self.protected.remove(&class_name);
        if !self.unprotected.contains(&class_name) {
            self.unprotected.push(class_name);
        }
    }
}

impl ManifestIndex {
    /// Split the enabled components with the given tag into protected and
    /// unprotected ones.
    ///
    /// A component's permission is the first present of its own `permission`,
    /// `readPermission`, `writePermission`, then the application's
    /// `permission`. Components with `enabled="false"` are left out, as are
    /// components without a name. A name declared twice keeps the result of
    /// its last declaration. `tag` is compared against the tag names of the
    /// application's children as is, so path separators or `*` never match.
    pub fn find_components(&self, tag: &str) -> ComponentProtection {
        let mut result = ComponentProtection::default();
        let Some(app) = self.application() else {
            return result;
        };

        let default_permission = self.lookup(app, PERMISSION);

        for component in app.elements().filter(|child| child.name() == tag) {
            if self.lookup(component, ENABLED) == Some("false") {
                continue;
            }

            let Some(name) = self.lookup_name(component) else {
                debug!("Skipping <{}> without a name", tag);
                continue;
            };
            let class_name = self.resolve(name);

            let permission = [PERMISSION, READ_PERMISSION, WRITE_PERMISSION]
                .into_iter()
                .find_map(|attr| self.lookup(component, attr))
                .or(default_permission);

            match permission {
                Some(permission) => result.mark_protected(class_name, permission.to_string()),
                None => result.mark_unprotected(class_name),
            }
        }

        debug!(
            "<{}>: {} protected, {} unprotected",
            tag,
            result.protected.len(),
            result.unprotected.len()
        );
        result
    }

    /// [`find_components`](Self::find_components) for a known kind
    pub fn components(&self, kind: ComponentKind) -> ComponentProtection {
        self.find_components(kind.tag())
    }
}
