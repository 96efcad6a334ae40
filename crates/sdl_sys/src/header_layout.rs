//! Compares the declared native layouts with the installed headers, through
//! the offset table `csrc/abi_layout.c` is compiled into.

use std::collections::{BTreeSet, HashMap};
use std::ffi::{c_char, CStr};
use std::slice;

use sdl_abi::contract::declared_pairs;
use sdl_abi::layout::{normalize_field, RecordLayout};

#[repr(C)]
struct Entry {
    name: *const c_char,
    value: usize,
}

extern "C" {
    fn sdl_abi_layout(count: *mut usize) -> *const Entry;
}

/// `"SDL_Rect"` to its size, `"SDL_Rect.w"` to an offset.
fn header_table() -> HashMap<String, usize> {
    let mut count = 0;
    // SAFETY: returns a static array of `count` entries.
    let entries = unsafe { slice::from_raw_parts(sdl_abi_layout(&mut count), count) };
    entries
        .iter()
        .map(|entry| {
            // SAFETY: names are string literals in the table.
            let name = unsafe { CStr::from_ptr(entry.name) };
            (name.to_string_lossy().into_owned(), entry.value)
        })
        .collect()
}

/// Later headers append fields to event records; the union keeps them in bounds.
fn may_grow(record: &RecordLayout) -> bool {
    record.name.ends_with("Event")
}

#[test]
fn declared_layouts_match_the_headers() {
    let table = header_table();
    let mut checked = BTreeSet::new();
    let mut failures = Vec::new();

    for (_, native) in declared_pairs() {
        checked.insert(native.name.to_owned());
        match table.get(native.name) {
            Some(&size) if size == native.size || (may_grow(&native) && size > native.size) => {}
            Some(&size) => failures.push(format!(
                "{} is {} bytes in the headers, declared {}",
                native.name, size, native.size
            )),
            None => failures.push(format!("{} is not in the header table", native.name)),
        }
        for field in native.fields.iter().filter(|field| normalize_field(field.name).is_some()) {
            let key = format!("{}.{}", native.name, field.name);
            match table.get(&key) {
                Some(&offset) if offset == field.offset => {}
                Some(&offset) => failures.push(format!(
                    "{key} is at {offset} in the headers, declared {}",
                    field.offset
                )),
                None => failures.push(format!("{key} is not in the header table")),
            }
            checked.insert(key);
        }
    }

    let unchecked: Vec<&String> = table.keys().filter(|key| !checked.contains(*key)).collect();
    assert!(failures.is_empty(), "header mismatches: {failures:#?}");
    assert!(unchecked.is_empty(), "header entries with no declared record: {unchecked:?}");
}
