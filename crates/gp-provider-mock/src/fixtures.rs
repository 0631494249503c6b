// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! JSON builders shaped like provider responses

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Value};

pub fn repository(id: u64, name: &str, last_activity_at: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "path": name,
        "pathWithNamespace": format!("team/{}", name),
        "visibility": "private",
        "webUrl": format!("https://codeup.example.com/team/{}", name),
        "lastActivityAt": last_activity_at,
        "createdAt": "2023-01-01T00:00:00Z",
        "namespaceId": 100
    })
}

pub fn branch(name: &str, committed_date: &str) -> Value {
    json!({
        "name": name,
        "defaultBranch": name == "master",
        "protected": false,
        "webUrl": format!("https://codeup.example.com/branches/{}", name),
        "commit": {
            "id": format!("head-of-{}", name),
            "shortId": "head",
            "authorName": "Zhang San",
            "authorEmail": "zhangsan@example.com",
            "authoredDate": committed_date,
            "committerName": "Zhang San",
            "committerEmail": "zhangsan@example.com",
            "committedDate": committed_date,
            "message": format!("tip of {}\n", name),
            "parentIds": []
        }
    })
}

pub fn commit(id: &str, authored_date: &str) -> Value {
    commit_by(id, authored_date, "Zhang San", "zhangsan@example.com")
}

pub fn commit_by(id: &str, authored_date: &str, author_name: &str, author_email: &str) -> Value {
    json!({
        "id": id,
        "shortId": id.chars().take(8).collect::<String>(),
        "authorName": author_name,
        "authorEmail": author_email,
        "authoredDate": authored_date,
        "committerName": author_name,
        "committerEmail": author_email,
        "committedDate": authored_date,
        "message": format!("change {}\n\n", id),
        "parentIds": [],
        "stats": {"additions": 10, "deletions": 2, "total": 12},
        "webUrl": format!("https://codeup.example.com/commit/{}", id)
    })
}

/// `count` commits one day apart, the newest at `newest`
pub fn daily_commits(prefix: &str, newest: DateTime<Utc>, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let when = newest - Duration::days(i as i64);
            commit(&format!("{}-{:02}", prefix, i), &timestamp(when))
        })
        .collect()
}

pub fn diff(old_path: &str, new_path: &str, text: &str) -> Value {
    json!({
        "oldPath": old_path,
        "newPath": new_path,
        "diff": text,
        "deletedFile": false,
        "newFile": old_path != new_path && old_path.is_empty(),
        "renamedFile": !old_path.is_empty() && old_path != new_path
    })
}

pub fn timestamp(when: DateTime<Utc>) -> String {
    when.to_rfc3339_opts(SecondsFormat::Secs, true)
}
