use crate::{
    encoding::{encode, table},
    error::MalformedUri,
    query::{Query, QueryValue},
    uri::Uri,
};
use std::{
    fmt::{Debug, Display, Formatter, Result},
    str::FromStr,
};

impl Display for Uri {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.absolute_url())
    }
}

impl Debug for Uri {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme())
            .field("user", &self.user())
            .field("password", &self.password())
            .field("host", &self.host())
            .field("port", &self.explicit_port())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl FromStr for Uri {
    type Err = MalformedUri;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut first = true;
        let mut pair = |f: &mut Formatter<'_>, key: &str, value: &str| {
            if !first {
                f.write_str("&")?;
            }
            first = false;
            write!(f, "{}={}", encode(key, table::UNRESERVED), value)
        };
        for (key, value) in self.iter() {
            match value {
                QueryValue::Single(value) => {
                    pair(f, key, &encode(value, table::UNRESERVED))?;
                }
                QueryValue::List(items) => {
                    for item in items {
                        pair(f, &format!("{key}[]"), &encode(item, table::UNRESERVED))?;
                    }
                }
            }
        }
        Ok(())
    }
}
