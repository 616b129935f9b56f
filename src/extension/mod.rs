// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test execution hooks and the pending-until-fixed interceptor.

mod context;
mod hooks;
pub(crate) mod lifecycle;
mod pending;
mod standalone;
mod store;

pub use context::*;
pub use hooks::*;
pub use pending::*;
pub use standalone::*;
pub use store::*;
