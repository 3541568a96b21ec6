//! Shared fixture: a small two-thread Firefox-style profile.
//!
//! GeckoMain
//! - samples: main>run>paint x3, main>run>layout x1, main x1 (1ms interval)
//! - markers: long tasks of 60/80/150ms, one 60ms GC, one sync IPC at 600ms,
//!   a click at 700ms and a paint at 710ms
//!
//! DOM Worker
//! - samples: onmessage x2 with 1ms of CPU each
//! - markers: one sync IPC at 604ms

#![allow(dead_code)]

use browser_trace_studio::model::Profile;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn fixture_json() -> Value {
    json!({
        "meta": {
            "interval": 1.0,
            "startTime": 1700000000000.0,
            "profilingStartTime": 0.0,
            "profilingEndTime": 1000.0,
            "product": "Firefox",
            "categories": [
                {"name": "Other", "color": "grey"},
                {"name": "Layout", "color": "purple"},
                {"name": "JavaScript", "color": "yellow"},
                {"name": "GC / CC", "color": "orange"},
                {"name": "IPC", "color": "lightgreen"},
                {"name": "DOM", "color": "blue"},
                {"name": "Graphics", "color": "green"}
            ],
            "extensions": {
                "id": ["ublock@example"],
                "name": ["uBlock"],
                "baseURL": ["moz-extension://ublock/"]
            }
        },
        "shared": {
            "stringArray": [
                "main", "run", "paint", "layout", "MainThreadLongTask",
                "GCMajor", "IPCOut", "DOMEvent", "Paint", "onmessage"
            ]
        },
        "threads": [
            {
                "name": "GeckoMain",
                "processType": "default",
                "pid": 100,
                "tid": 100,
                "isMainThread": true,
                "funcTable": {
                    "name": [0, 1, 2, 3],
                    "resource": [-1, -1, -1, -1],
                    "isJS": [true, true, true, true]
                },
                "frameTable": {"func": [0, 1, 2, 3]},
                "stackTable": {"frame": [0, 1, 2, 3], "prefix": [null, 0, 1, 1]},
                "samples": {"stack": [2, 2, 2, 3, 0], "time": [0.0, 1.0, 2.0, 3.0, 4.0]},
                "markers": {
                    "name": [4, 4, 4, 5, 6, 7, 8],
                    "startTime": [100.0, 300.0, 500.0, 200.0, 600.0, 700.0, 710.0],
                    "endTime": [160.0, 380.0, 650.0, 260.0, 612.0, 701.0, 730.0],
                    "phase": [1, 1, 1, 1, 1, 1, 1],
                    "category": [2, 2, 2, 3, 4, 5, 6],
                    "data": [
                        null, null, null, null,
                        {"type": "IPC", "sync": true},
                        {"type": "DOMEvent", "eventType": "click"},
                        null
                    ]
                }
            },
            {
                "name": "DOM Worker",
                "processType": "default",
                "pid": 100,
                "tid": "101",
                "funcTable": {"name": [9], "resource": [-1]},
                "frameTable": {"func": [0]},
                "stackTable": {"frame": [0], "prefix": [null]},
                "samples": {
                    "stack": [0, 0],
                    "time": [605.0, 606.0],
                    "threadCPUDelta": [1000000.0, 1000000.0]
                },
                "markers": {
                    "name": [6],
                    "startTime": [604.0],
                    "endTime": [620.0],
                    "phase": [1],
                    "category": [4],
                    "data": [{"type": "IPC", "isSync": "true"}]
                }
            }
        ]
    })
}

pub fn fixture_profile() -> Profile {
    serde_json::from_value(fixture_json()).unwrap()
}

/// Write the fixture to a temporary directory and return its path
pub fn write_fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("profile.json");
    std::fs::write(&path, serde_json::to_string_pretty(&fixture_json()).unwrap()).unwrap();
    path
}
