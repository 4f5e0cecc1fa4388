//! Depth-first locator for every value stored under a given key name.

use serde_json::Value;

/// Lazy iterator over every value in a JSON tree whose key equals a lookup
/// key, at any nesting depth.
///
/// Traversal is an explicit-stack depth-first walk in document order. When a
/// key matches, its value is yielded and NOT descended into; everything else
/// is descended. Arrays are walked element by element, scalars yield nothing.
/// A matched value of the wrong shape (not an array of notes) is still
/// yielded; shape enforcement happens at the rewrite stage.
pub struct KeyValues<'a> {
    key: &'a str,
    stack: Vec<&'a mut Value>,
}

impl<'a> KeyValues<'a> {
    #[must_use]
    pub fn new(root: &'a mut Value, key: &'a str) -> Self {
        Self {
            key,
            stack: vec![root],
        }
    }
}

impl<'a> Iterator for KeyValues<'a> {
    type Item = &'a mut Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Value::Object(map) => {
                    // Object keys are unique, so at most one match per node.
                    // Children go on the stack in reverse so they pop in
                    // document order.
                    let mut matched = None;
                    for (k, v) in map.iter_mut().rev() {
                        if k == self.key {
                            matched = Some(v);
                        } else {
                            self.stack.push(v);
                        }
                    }
                    if let Some(value) = matched {
                        return Some(value);
                    }
                }
                Value::Array(items) => {
                    self.stack.extend(items.iter_mut().rev());
                }
                _ => {}
            }
        }
        None
    }
}
