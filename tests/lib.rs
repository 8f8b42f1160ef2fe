mod properties;
mod util;
