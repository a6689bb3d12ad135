//! 测试用的脚本化传输和记录型延时

use crate::error::ApiError;
use crate::infrastructure::browser::UrlOpener;
use crate::infrastructure::http_executor::{HttpReply, RaffleTransport};
use crate::infrastructure::pacer::Pacer;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

type Scripted<T> = Result<T, u16>;

/// 记录下来的 POST 请求
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub path: String,
    pub form: Vec<(String, String)>,
    pub referer: Option<String>,
}

impl RecordedPost {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// 按路径预设响应的传输
///
/// 每个路径的响应按顺序消费，最后一条会一直重复。
#[derive(Default)]
pub struct ScriptedTransport {
    gets: Mutex<HashMap<String, VecDeque<Scripted<String>>>>,
    posts: Mutex<HashMap<String, VecDeque<Scripted<HttpReply>>>>,
    get_log: Mutex<Vec<String>>,
    post_log: Mutex<Vec<RecordedPost>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(&self, path: &str, body: impl Into<String>) {
        push(&self.gets, path, Ok(body.into()));
    }

    pub fn fail_get(&self, path: &str, status: u16) {
        push(&self.gets, path, Err(status));
    }

    pub fn on_post(&self, path: &str, reply: HttpReply) {
        push(&self.posts, path, Ok(reply));
    }

    pub fn on_post_json(&self, path: &str, json: &str) {
        self.on_post(path, HttpReply::ok(json));
    }

    pub fn gets(&self) -> Vec<String> {
        self.get_log.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.post_log.lock().unwrap().clone()
    }

    pub fn posts_to(&self, path: &str) -> Vec<RecordedPost> {
        self.posts().into_iter().filter(|p| p.path == path).collect()
    }
}

fn push<T>(table: &Mutex<HashMap<String, VecDeque<Scripted<T>>>>, path: &str, item: Scripted<T>) {
    table
        .lock()
        .unwrap()
        .entry(path.to_string())
        .or_default()
        .push_back(item);
}

fn next<T: Clone>(table: &Mutex<HashMap<String, VecDeque<Scripted<T>>>>, path: &str) -> Scripted<T> {
    let mut table = table.lock().unwrap();
    let Some(queue) = table.get_mut(path) else {
        return Err(404);
    };
    if queue.len() > 1 {
        queue.pop_front().unwrap_or(Err(404))
    } else {
        queue.front().cloned().unwrap_or(Err(404))
    }
}

#[async_trait]
impl RaffleTransport for ScriptedTransport {
    async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        self.get_log.lock().unwrap().push(path.to_string());
        next(&self.gets, path).map_err(|status| ApiError::BadStatus {
            endpoint: path.to_string(),
            status,
        })
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
        referer: Option<&str>,
    ) -> Result<HttpReply, ApiError> {
        self.post_log.lock().unwrap().push(RecordedPost {
            path: path.to_string(),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            referer: referer.map(str::to_string),
        });
        next(&self.posts, path).map_err(|status| ApiError::BadStatus {
            endpoint: path.to_string(),
            status,
        })
    }
}

/// 只记录时长、不真正等待的延时
#[derive(Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

/// 只记录链接、不真正打开的浏览器
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no browser"));
        }
        Ok(())
    }
}
