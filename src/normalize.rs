//! Comment repairs applied before the namespace tree is built.
//!
//! - `@internal` marking and `@type` materialization run on every comment
//!   reachable through params, properties and member groups.
//! - Constructor promotion runs on top-level comments only.

use crate::model::{Comment, TypeExpr};

/// Member name that is promoted to the owning comment's constructor.
pub const CONSTRUCTOR_NAME: &str = "constructor";

/// Repair `comment` and everything nested below it.
///
/// Each node is handled independently, so running this twice yields the
/// same result as running it once.
pub fn normalize(comment: &mut Comment) {
    mark_internal(comment);
    materialize_type(comment);
    for nested in comment.nested_mut() {
        normalize(nested);
    }
}

/// `isInternal` is true iff an `@internal` tag is present.
fn mark_internal(comment: &mut Comment) {
    comment.is_internal = comment.has_tag("internal");
}

/// Fill a missing `type` from the first `@type` tag: the tag's own type if it
/// has one, otherwise a name expression built from its description.
fn materialize_type(comment: &mut Comment) {
    if comment.type_expr.is_some() {
        return;
    }
    let repaired = comment
        .tags
        .iter()
        .find(|tag| tag.title == "type")
        .map(|tag| {
            tag.type_expr
                .clone()
                .unwrap_or_else(|| TypeExpr::NameExpression {
                    name: tag.description.clone(),
                })
        });
    if repaired.is_some() {
        comment.type_expr = repaired;
    }
}

/// Split the first member named `constructor` out of `members`, keeping the
/// order of the rest. Later entries with the same name stay where they are.
pub fn split_constructor(mut members: Vec<Comment>) -> (Vec<Comment>, Option<Comment>) {
    match members.iter().position(|m| m.name == CONSTRUCTOR_NAME) {
        Some(index) => {
            let constructor = members.remove(index);
            (members, Some(constructor))
        }
        None => (members, None),
    }
}

/// Promote an instance member named `constructor` to `comment.constructor`,
/// taking over its params. Returns whether a constructor was promoted.
pub fn extract_constructor(comment: &mut Comment) -> bool {
    let Some(members) = comment.members.as_mut() else {
        return false;
    };
    if members.instance.is_empty() {
        return false;
    }

    let (remaining, constructor) = split_constructor(std::mem::take(&mut members.instance));
    members.instance = remaining;

    match constructor {
        Some(constructor) => {
            comment.params = constructor.params.clone();
            comment.constructor = Some(Box::new(constructor));
            true
        }
        None => false,
    }
}
