// handlers - grouped by security tier
//
// public      no authentication (/token)
// protected   bearer token required (/users/me/)
// satellites  public by default, gated when `security.protect_satellites` is set

pub mod protected;
pub mod public;
pub mod satellites;
