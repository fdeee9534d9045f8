//! HarborFlow のプロビジョニング実体
//!
//! 各モジュールが構築フローの 1 ステップに対応する。すべて外部コマンド
//! （apt-get, openssl, docker, systemctl）への委譲で、リトライは行わない。
//! 失敗は即座に [`ProvisionError`] として呼び出し元に返る。

pub mod command;
pub mod error;
pub mod htpasswd;
pub mod installer;
pub mod launcher;
pub mod prepare;
pub mod tls;
pub mod trust;
pub mod verify;

pub use error::*;
