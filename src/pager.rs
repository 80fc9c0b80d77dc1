use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use serde_json::Value;

/// Walks a paged WordPress list endpoint, yielding one element at a time.
///
/// Pages are requested on demand, starting from page 1. A page whose body is
/// a non-empty JSON array feeds the iterator; an empty array, or a body that
/// is not an array at all (WordPress answers an error object once the pages
/// run out), ends the iteration.
pub struct PagedList<F> {
    fetch: F,
    page: u32,
    buffer: VecDeque<Value>,
    done: bool,
}

impl<F> PagedList<F>
where
    F: FnMut(u32) -> Result<String>,
{
    pub fn new(fetch: F) -> Self {
        PagedList {
            fetch,
            page: 1,
            buffer: VecDeque::new(),
            done: false,
        }
    }
}

impl<F> Iterator for PagedList<F>
where
    F: FnMut(u32) -> Result<String>,
{
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Result<Value>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }

            let body = match (self.fetch)(self.page) {
                Ok(body) => body,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            let parsed: Value = match serde_json::from_str(&body) {
                Ok(value) => value,
                Err(e) => {
                    self.done = true;
                    return Some(Err(anyhow!("Page {} is not valid JSON: {}", self.page, e)));
                }
            };

            match parsed {
                Value::Array(items) if !items.is_empty() => {
                    self.buffer.extend(items);
                    self.page += 1;
                }
                _ => self.done = true,
            }
        }
    }
}
