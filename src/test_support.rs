//! A minimal in-memory [`Capabilities`] implementation shared by the unit
//! tests in `commands::*`. Not part of the public API.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::capabilities::{
    ArticleCaps, GroupCaps, GroupListingCaps, LoginCaps, PostOutcome, PostingCaps, Privilege,
};
use crate::session::state::{Article, ArticleRange, Group};
use crate::wildmat::WildMat;

#[derive(Default)]
pub struct FakeCaps {
    groups: Mutex<HashMap<Bytes, (i64, i64, i64)>>,
    articles: Mutex<HashMap<Bytes, Bytes>>,
}

impl FakeCaps {
    pub fn with_article(id: &[u8], content: &[u8]) -> Self {
        let caps = Self::default();
        caps.articles
            .lock()
            .unwrap()
            .insert(Bytes::copy_from_slice(id), Bytes::copy_from_slice(content));
        caps
    }

    pub fn with_group(name: &[u8], count: i64, low: i64, high: i64) -> Self {
        let caps = Self::default();
        caps.groups
            .lock()
            .unwrap()
            .insert(Bytes::copy_from_slice(name), (count, low, high));
        caps
    }
}

#[async_trait]
impl GroupCaps for FakeCaps {
    async fn get_group(&self, g: &mut Group) -> bool {
        if let Some(&(count, low, high)) = self.groups.lock().unwrap().get(g.name.as_ref()) {
            g.count = count;
            g.low = low;
            g.high = high;
            true
        } else {
            false
        }
    }

    async fn list_group(&self, _g: &Group, _first: i64, _last: i64, _out: &mut Vec<u8>) {}

    async fn cursor_move_group(&self, _g: &Group, _i: i64, _backward: bool) -> Option<(i64, Bytes)> {
        None
    }
}

#[async_trait]
impl ArticleCaps for FakeCaps {
    async fn stat_article(&self, a: &mut Article) -> bool {
        match &a.message_id {
            Some(id) => self.articles.lock().unwrap().contains_key(id),
            None => false,
        }
    }

    async fn get_article(&self, a: &mut Article, _head: bool, _body: bool, out: &mut Vec<u8>) -> bool {
        let Some(id) = a.message_id.clone() else {
            return false;
        };
        match self.articles.lock().unwrap().get(&id) {
            Some(content) => {
                out.extend_from_slice(content);
                true
            }
            None => false,
        }
    }

    async fn write_overview(&self, ar: &ArticleRange, out: &mut Vec<u8>) -> bool {
        if ar.article.message_id.is_none() && ar.article.group.is_none() {
            return false;
        }
        crate::helpers::append_uint(out, ar.article.number.unwrap_or(0));
        out.extend_from_slice(b"\tSubject: hi\t...\r\n");
        true
    }

    async fn write_header(&self, header: &[u8], ar: &ArticleRange, out: &mut Vec<u8>) -> bool {
        if ar.article.message_id.is_none() && ar.article.group.is_none() {
            return false;
        }
        crate::helpers::append_uint(out, ar.article.number.unwrap_or(0));
        out.push(b' ');
        out.extend_from_slice(header);
        out.extend_from_slice(b"\r\n");
        true
    }
}

#[async_trait]
impl PostingCaps for FakeCaps {
    async fn check_post_id(&self, id: &[u8]) -> (bool, bool) {
        let wanted = !self.articles.lock().unwrap().contains_key(id);
        (wanted, true)
    }

    async fn check_post(&self) -> bool {
        true
    }

    async fn perform_post(&self, id: Option<&[u8]>, article: &[u8]) -> PostOutcome {
        let id = id
            .map(Bytes::copy_from_slice)
            .unwrap_or_else(|| Bytes::from_static(b"<generated@test>"));
        self.articles
            .lock()
            .unwrap()
            .insert(id, Bytes::copy_from_slice(article));
        PostOutcome::Accepted
    }
}

#[async_trait]
impl GroupListingCaps for FakeCaps {
    async fn list_groups(&self, _wm: Option<&WildMat>, out: &mut Vec<u8>) -> bool {
        for name in self.groups.lock().unwrap().keys() {
            out.extend_from_slice(name);
            out.extend_from_slice(b"\r\n");
        }
        true
    }
}

#[async_trait]
impl LoginCaps for FakeCaps {
    async fn authinfo_done(&self) -> bool {
        false
    }

    async fn check_privilege(&self, _p: Privilege) -> bool {
        true
    }

    async fn authinfo_user_only(&self, _user: &[u8]) -> bool {
        false
    }

    async fn authinfo_user_pass(&self, user: &[u8], password: &[u8]) -> bool {
        user == b"alice" && password == b"hunter2"
    }
}
