//! Authentication flow tests
