#[cfg(test)]
pub const RAW_POST: &str = r#"{
  "id": 10,
  "date": "2020-01-02T03:04:05",
  "date_gmt": "2020-01-02T03:04:05",
  "modified": "2020-01-05T10:11:12",
  "modified_gmt": "2020-01-05T10:11:12",
  "slug": "hello-world",
  "status": "publish",
  "type": "post",
  "link": "https://blog.example.org/2020/01/02/hello-world/",
  "title": {
    "rendered": "A &amp; B"
  },
  "content": {
    "rendered": "<p>It&#8217;s alive</p>\n",
    "protected": false
  },
  "excerpt": {
    "rendered": "<p>Summary&hellip;</p>\n",
    "protected": false
  },
  "author": 1,
  "categories": [1],
  "tags": [2]
}"#;
