//! Fixed RBAC rule groups granted to components under test.
//!
//! The groups are compile-time constants; [`default_policy_rules`] converts
//! them into `PolicyRule`s once per process and hands out the same
//! read-only slice afterwards.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use k8s_openapi::api::rbac::v1::{ClusterRole, PolicyRule};
use kube::api::ObjectMeta;

const ALL_VERBS: &[&str] = &[
    "create", "get", "list", "watch", "update", "delete", "patch",
];

/// A named (API groups, resources, verbs) grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleGroup {
    pub name: &'static str,
    pub api_groups: &'static [&'static str],
    pub resources: &'static [&'static str],
    pub verbs: &'static [&'static str],
}

impl RuleGroup {
    pub fn to_policy_rule(&self) -> PolicyRule {
        PolicyRule {
            api_groups: Some(owned(self.api_groups)),
            resources: Some(owned(self.resources)),
            verbs: owned(self.verbs),
            ..Default::default()
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub const CSI_RULE: RuleGroup = RuleGroup {
    name: "csi",
    api_groups: &["csi.aliyun.com"],
    resources: &[
        "nodelocalstorages",
        "nodelocalstorages/status",
        "nodelocalstorageinitconfigs",
    ],
    verbs: ALL_VERBS,
};

pub const EVENTS_RULE: RuleGroup = RuleGroup {
    name: "events",
    api_groups: &[""],
    resources: &["events"],
    verbs: &["create", "update", "patch"],
};

pub const CORE_RULE: RuleGroup = RuleGroup {
    name: "core",
    api_groups: &[""],
    resources: &[
        "nodes",
        "pods",
        "pods/binding",
        "pods/status",
        "bindings",
        "persistentvolumeclaims",
        "persistentvolumeclaims/status",
        "persistentvolumes",
        "persistentvolumes/status",
        "namespaces",
        "secrets",
    ],
    verbs: ALL_VERBS,
};

pub const STORAGE_RULE: RuleGroup = RuleGroup {
    name: "storage",
    api_groups: &["storage.k8s.io"],
    resources: &["storageclasses", "csinodes", "volumeattachments"],
    verbs: &["get", "list", "watch"],
};

pub const SNAPSHOT_RULE: RuleGroup = RuleGroup {
    name: "snapshot",
    api_groups: &["snapshot.storage.k8s.io"],
    resources: &[
        "volumesnapshotclasses",
        "volumesnapshots",
        "volumesnapshots/status",
        "volumesnapshotcontents",
        "volumesnapshotcontents/status",
    ],
    verbs: ALL_VERBS,
};

pub const COORDINATION_RULE: RuleGroup = RuleGroup {
    name: "coordination",
    api_groups: &["coordination.k8s.io"],
    resources: &["leases"],
    verbs: ALL_VERBS,
};

/// Every built-in group, in a stable order.
pub const DEFAULT_RULE_GROUPS: &[RuleGroup] = &[
    CSI_RULE,
    EVENTS_RULE,
    CORE_RULE,
    STORAGE_RULE,
    SNAPSHOT_RULE,
    COORDINATION_RULE,
];

/// Look up a built-in group by name.
pub fn rule_group(name: &str) -> Option<&'static RuleGroup> {
    DEFAULT_RULE_GROUPS.iter().find(|g| g.name == name)
}

/// [`DEFAULT_RULE_GROUPS`] as `PolicyRule`s, built on first use.
pub fn default_policy_rules() -> &'static [PolicyRule] {
    static RULES: OnceLock<Vec<PolicyRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        DEFAULT_RULE_GROUPS
            .iter()
            .map(RuleGroup::to_policy_rule)
            .collect()
    })
}

// ── ClusterRoleBuilder ──────────────────────────────────────────────────────

/// Builder for `rbac/v1 ClusterRole` objects.
///
/// ```ignore
/// let role = ClusterRoleBuilder::new("csi-e2e")
///     .rule_group(&CSI_RULE)
///     .rule_group(&EVENTS_RULE)
///     .build();
/// ```
pub struct ClusterRoleBuilder {
    name: String,
    labels: BTreeMap<String, String>,
    rules: Vec<PolicyRule>,
}

impl ClusterRoleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
            rules: vec![],
        }
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn rule_group(mut self, group: &RuleGroup) -> Self {
        self.rules.push(group.to_policy_rule());
        self
    }

    pub fn rule(mut self, rule: PolicyRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(self) -> ClusterRole {
        ClusterRole {
            metadata: ObjectMeta {
                name: Some(self.name),
                labels: if self.labels.is_empty() {
                    None
                } else {
                    Some(self.labels)
                },
                ..Default::default()
            },
            rules: Some(self.rules),
            ..Default::default()
        }
    }
}
