use crate::{
    encoding::table::{
        Table, FRAGMENT, HEXDIG, PATH, QUERY, REG_NAME, SCHEME, SEGMENT_NZ_NC, USERINFO,
    },
    error::MalformedUriKind,
};
use std::{
    net::Ipv6Addr,
    ops::{Deref, DerefMut},
    str,
};

type Result<T> = std::result::Result<T, Failure>;

/// A parse failure not yet tied to its input.
pub(crate) struct Failure {
    pub(crate) index: usize,
    pub(crate) kind: MalformedUriKind,
}

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(Failure {
            index: $index,
            kind: MalformedUriKind::$kind,
        })
    };
}

/// The raw components of a URI reference, borrowed from the input.
///
/// All parts are validated but still percent-encoded.
#[derive(Default)]
pub(crate) struct Components<'a> {
    pub(crate) scheme: Option<&'a str>,
    pub(crate) userinfo: Option<&'a str>,
    pub(crate) host: Option<&'a str>,
    pub(crate) port: Option<u16>,
    pub(crate) path: &'a str,
    pub(crate) query: Option<&'a str>,
    pub(crate) fragment: Option<&'a str>,
}

pub(crate) fn parse(input: &str) -> Result<Components<'_>> {
    let mut parser = Parser {
        input,
        reader: Reader::new(input.as_bytes()),
        out: Components::default(),
    };
    parser.parse_from_scheme()?;
    Ok(parser.out)
}

/// URI reference parser.
///
/// # Invariants
///
/// `pos <= len`, `pos` is non-decreasing and on the boundary of a UTF-8
/// code point (the tables allow ASCII only, so reads stop before any
/// non-ASCII byte).
struct Parser<'a> {
    input: &'a str,
    reader: Reader<'a>,
    out: Components<'a>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl<'a> DerefMut for Parser<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}

enum PathKind {
    General,
    AbEmpty,
    ContinuedNoScheme,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    // Returns `true` iff any byte is read.
    fn read(&mut self, table: &Table) -> Result<bool> {
        let start = self.pos;
        self.read_with(table, |_, _| {})?;
        Ok(self.pos > start)
    }

    fn read_with(&mut self, table: &Table, mut f: impl FnMut(usize, u8)) -> Result<()> {
        let mut i = self.pos;
        let allows_enc = table.allows_enc();

        while i < self.len() {
            let x = self.bytes[i];
            if allows_enc && x == b'%' {
                if i + 2 >= self.len() {
                    err!(i, InvalidOctet);
                }
                let (hi, lo) = (self.bytes[i + 1], self.bytes[i + 2]);
                if !(HEXDIG.allows(hi) && HEXDIG.allows(lo)) {
                    err!(i, InvalidOctet);
                }
                i += 3;
            } else {
                if !table.allows(x) {
                    break;
                }
                f(i, x);
                i += 1;
            }
        }

        // INVARIANT: `i` is non-decreasing.
        self.pos = i;
        Ok(())
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    // Returns the span of the digits after ":", if a ":" is read at all.
    fn read_port(&mut self) -> Option<(usize, usize)> {
        if !self.read_str(":") {
            return None;
        }
        let start = self.pos;
        let mut i = 0;
        while matches!(self.peek(i), Some(x) if x.is_ascii_digit()) {
            i += 1;
        }
        // INVARIANT: Skipping `i` digits is fine.
        self.skip(i);
        Some((start, self.pos))
    }

    // Returns the span of the literal including the brackets.
    fn read_ip_literal(&mut self) -> Result<Option<(usize, usize)>> {
        if !self.read_str("[") {
            return Ok(None);
        }
        let start = self.pos - 1;

        let close = match self.bytes[self.pos..].iter().position(|&x| x == b']') {
            Some(i) => self.pos + i,
            None => err!(start, InvalidIpLiteral),
        };
        let addr = &self.bytes[self.pos..close];
        if str::from_utf8(addr)
            .ok()
            .and_then(|s| s.parse::<Ipv6Addr>().ok())
            .is_none()
        {
            err!(start, InvalidIpLiteral);
        }

        // INVARIANT: `close` points at "]" so it's fine to move past it.
        self.pos = close + 1;
        Ok(Some((start, self.pos)))
    }
}

impl<'a> Parser<'a> {
    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    fn parse_port(&self, start: usize, end: usize) -> Result<Option<u16>> {
        let digits = self.slice(start, end);
        if digits.is_empty() {
            return Ok(None);
        }
        match digits.parse::<u16>() {
            Ok(port) => Ok(Some(port)),
            Err(_) => err!(start, InvalidPort),
        }
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        self.read(SCHEME)?;

        if self.peek(0) == Some(b':') {
            // Scheme starts with a letter.
            if self.pos > 0 && self.bytes[0].is_ascii_alphabetic() {
                self.out.scheme = Some(self.slice(0, self.pos));
            } else {
                err!(0, UnexpectedChar);
            }

            // INVARIANT: Skipping ":" is fine.
            self.skip(1);
            return if self.read_str("//") {
                self.parse_from_authority()
            } else {
                self.parse_from_path(PathKind::General)
            };
        } else if self.pos == 0 && self.read_str("//") {
            return self.parse_from_authority();
        }
        // Scheme chars read so far are valid for a path segment.
        self.parse_from_path(PathKind::ContinuedNoScheme)
    }

    fn parse_from_authority(&mut self) -> Result<()> {
        let auth_start = self.pos;

        let mut colon_cnt = 0;
        let mut colon_i = 0;

        // `USERINFO` covers the userinfo, the registered name, ":", and the port.
        self.read_with(USERINFO, |i, x| {
            if x == b':' {
                colon_cnt += 1;
                colon_i = i;
            }
        })?;

        if self.peek(0) == Some(b'@') {
            // Userinfo present.
            self.out.userinfo = Some(self.slice(auth_start, self.pos));
            // INVARIANT: Skipping "@" is fine.
            self.skip(1);

            let host_start = self.pos;
            if let Some((start, end)) = self.read_ip_literal()? {
                self.out.host = Some(self.slice(start, end));
            } else {
                self.read(REG_NAME)?;
                self.out.host = Some(self.slice(host_start, self.pos));
            }
            if let Some((start, end)) = self.read_port() {
                self.out.port = self.parse_port(start, end)?;
            }
        } else if self.pos == auth_start {
            // Nothing read. We're now at the start of an IP literal or the path.
            if let Some((start, end)) = self.read_ip_literal()? {
                self.out.host = Some(self.slice(start, end));
                if let Some((start, end)) = self.read_port() {
                    self.out.port = self.parse_port(start, end)?;
                }
            } else {
                // Empty authority.
                self.out.host = Some("");
            }
        } else {
            // The whole authority is read. Split it into the host and the port.
            let host_end = match colon_cnt {
                // All host.
                0 => self.pos,
                // Host and port.
                1 => {
                    for i in colon_i + 1..self.pos {
                        if !self.bytes[i].is_ascii_digit() {
                            err!(i, UnexpectedChar);
                        }
                    }
                    colon_i
                }
                // Multiple colons.
                _ => err!(colon_i, UnexpectedChar),
            };

            self.out.host = Some(self.slice(auth_start, host_end));
            if host_end < self.pos {
                self.out.port = self.parse_port(host_end + 1, self.pos)?;
            }
        }

        self.parse_from_path(PathKind::AbEmpty)
    }

    fn parse_from_path(&mut self, kind: PathKind) -> Result<()> {
        let (start, end) = match kind {
            PathKind::General => {
                let start = self.pos;
                self.read(PATH)?;
                (start, self.pos)
            }
            PathKind::AbEmpty => {
                let start = self.pos;
                // Either empty or starting with "/".
                if self.read(PATH)? && self.bytes[start] != b'/' {
                    err!(start, UnexpectedChar);
                }
                (start, self.pos)
            }
            PathKind::ContinuedNoScheme => {
                self.read(SEGMENT_NZ_NC)?;

                if self.peek(0) == Some(b':') {
                    // In a relative reference, the first path
                    // segment cannot contain a colon character.
                    err!(self.pos, UnexpectedChar);
                }

                self.read(PATH)?;
                (0, self.pos)
            }
        };
        self.out.path = self.slice(start, end);

        if self.read_str("?") {
            let start = self.pos;
            self.read(QUERY)?;
            self.out.query = Some(self.slice(start, self.pos));
        }

        if self.read_str("#") {
            let start = self.pos;
            self.read(FRAGMENT)?;
            self.out.fragment = Some(self.slice(start, self.pos));
        }

        if self.has_remaining() {
            err!(self.pos, UnexpectedChar);
        }
        Ok(())
    }
}
