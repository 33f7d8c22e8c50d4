use std::collections::BTreeMap;

use kube::api::Resource;

use super::*;

impl<T: Resource> KubeResourceExt for T {
    fn namespaced_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}", ns, self.name_any()),
            None => self.name_any().clone(),
        }
    }

    // Objects read from the apiserver always have a UID; the namespaced name is only a fallback for
    // objects that were constructed by hand.
    fn stable_id(&self) -> String {
        self.uid().unwrap_or_else(|| self.namespaced_name())
    }

    fn controller_uid(&self) -> Option<&str> {
        self.meta()
            .owner_references
            .as_ref()?
            .iter()
            .find(|rf| rf.controller == Some(true))
            .map(|rf| rf.uid.as_str())
    }

    fn matches(&self, sel: &metav1::LabelSelector) -> anyhow::Result<bool> {
        if let Some(exprs) = &sel.match_expressions {
            for expr in exprs {
                if !label_expr_match(self.labels(), expr)? {
                    return Ok(false);
                }
            }
        }

        if let Some(labels) = &sel.match_labels {
            for (k, v) in labels {
                if self.labels().get(k) != Some(v) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

// An empty selector matches everything in Kubernetes, which is never what we want when guessing at
// pod ownership, so callers use this to skip selector-based matching entirely.
pub fn selector_is_empty(sel: &metav1::LabelSelector) -> bool {
    sel.match_labels.as_ref().is_none_or(|l| l.is_empty())
        && sel.match_expressions.as_ref().is_none_or(|e| e.is_empty())
}

pub fn container_images(template: Option<&corev1::PodTemplateSpec>) -> (Vec<String>, Vec<String>) {
    let Some(spec) = template.and_then(|t| t.spec.as_ref()) else {
        return (vec![], vec![]);
    };

    let images = spec.containers.iter().filter_map(|c| c.image.clone()).collect();
    let init_images = spec
        .init_containers
        .as_ref()
        .map(|cs| cs.iter().filter_map(|c| c.image.clone()).collect())
        .unwrap_or_default();
    (images, init_images)
}

// The meanings of these operators is explained here:
// https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/#set-based-requirement
pub(super) const OPERATOR_IN: &str = "In";
pub(super) const OPERATOR_NOT_IN: &str = "NotIn";
pub(super) const OPERATOR_EXISTS: &str = "Exists";
pub(super) const OPERATOR_DOES_NOT_EXIST: &str = "DoesNotExist";

fn label_expr_match(
    obj_labels: &BTreeMap<String, String>,
    expr: &metav1::LabelSelectorRequirement,
) -> anyhow::Result<bool> {
    // LabelSelectorRequirement is considered invalid if the Operator is "In" or NotIn"
    // and there are no values; conversely for "Exists" and "DoesNotExist".
    match expr.operator.as_str() {
        OPERATOR_IN => match obj_labels.get(&expr.key) {
            Some(v) => match &expr.values {
                Some(values) if !values.is_empty() => Ok(values.contains(v)),
                _ => bail!(KubernetesError::malformed_label_selector(expr)),
            },
            None => Ok(false),
        },
        OPERATOR_NOT_IN => match obj_labels.get(&expr.key) {
            Some(v) => match &expr.values {
                Some(values) if !values.is_empty() => Ok(!values.contains(v)),
                _ => bail!(KubernetesError::malformed_label_selector(expr)),
            },
            None => Ok(true),
        },
        OPERATOR_EXISTS => match &expr.values {
            Some(values) if !values.is_empty() => bail!(KubernetesError::malformed_label_selector(expr)),
            _ => Ok(obj_labels.contains_key(&expr.key)),
        },
        OPERATOR_DOES_NOT_EXIST => match &expr.values {
            Some(values) if !values.is_empty() => {
                bail!(KubernetesError::malformed_label_selector(expr));
            },
            _ => Ok(!obj_labels.contains_key(&expr.key)),
        },
        _ => bail!(KubernetesError::malformed_label_selector(expr)),
    }
}
