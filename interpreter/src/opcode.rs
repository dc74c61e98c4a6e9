/// Opcode of a built-in operator. Built-ins are all single byte atoms; longer
/// operator atoms only ever reach the unknown-operator handler.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Opcode(pub u8);

// Evaluator forms.
impl Opcode {
	/// `q`
	pub const QUOTE: Opcode = Opcode(0x01);
	/// `a`
	pub const APPLY: Opcode = Opcode(0x02);
}

// Core operators.
impl Opcode {
	/// `i`
	pub const IF: Opcode = Opcode(0x03);
	/// `c`
	pub const CONS: Opcode = Opcode(0x04);
	/// `f`
	pub const FIRST: Opcode = Opcode(0x05);
	/// `r`
	pub const REST: Opcode = Opcode(0x06);
	/// `l`
	pub const LISTP: Opcode = Opcode(0x07);
	/// `x`
	pub const RAISE: Opcode = Opcode(0x08);
	/// `=`
	pub const EQ: Opcode = Opcode(0x09);
}

// Extended operators.
impl Opcode {
	/// `>s`
	pub const GR_BYTES: Opcode = Opcode(0x0a);
	/// `sha256`
	pub const SHA256: Opcode = Opcode(0x0b);
	/// `substr`
	pub const SUBSTR: Opcode = Opcode(0x0c);
	/// `strlen`
	pub const STRLEN: Opcode = Opcode(0x0d);
	/// `concat`
	pub const CONCAT: Opcode = Opcode(0x0e);

	/// `+`
	pub const ADD: Opcode = Opcode(0x10);
	/// `-`
	pub const SUBTRACT: Opcode = Opcode(0x11);
	/// `*`
	pub const MULTIPLY: Opcode = Opcode(0x12);
	/// `/`
	pub const DIV: Opcode = Opcode(0x13);
	/// `divmod`
	pub const DIVMOD: Opcode = Opcode(0x14);
	/// `>`
	pub const GR: Opcode = Opcode(0x15);
	/// `ash`
	pub const ASH: Opcode = Opcode(0x16);
	/// `lsh`
	pub const LSH: Opcode = Opcode(0x17);

	/// `logand`
	pub const LOGAND: Opcode = Opcode(0x18);
	/// `logior`
	pub const LOGIOR: Opcode = Opcode(0x19);
	/// `logxor`
	pub const LOGXOR: Opcode = Opcode(0x1a);
	/// `lognot`
	pub const LOGNOT: Opcode = Opcode(0x1b);

	/// `point_add`
	pub const POINT_ADD: Opcode = Opcode(0x1d);
	/// `pubkey_for_exp`
	pub const PUBKEY_FOR_EXP: Opcode = Opcode(0x1e);

	/// `not`
	pub const NOT: Opcode = Opcode(0x20);
	/// `any`
	pub const ANY: Opcode = Opcode(0x21);
	/// `all`
	pub const ALL: Opcode = Opcode(0x22);

	/// `softfork`
	pub const SOFTFORK: Opcode = Opcode(0x24);
}

/// Keyword of every opcode the standard table knows about.
pub const KEYWORDS: [(&str, Opcode); 32] = [
	("q", Opcode::QUOTE),
	("a", Opcode::APPLY),
	("i", Opcode::IF),
	("c", Opcode::CONS),
	("f", Opcode::FIRST),
	("r", Opcode::REST),
	("l", Opcode::LISTP),
	("x", Opcode::RAISE),
	("=", Opcode::EQ),
	(">s", Opcode::GR_BYTES),
	("sha256", Opcode::SHA256),
	("substr", Opcode::SUBSTR),
	("strlen", Opcode::STRLEN),
	("concat", Opcode::CONCAT),
	("+", Opcode::ADD),
	("-", Opcode::SUBTRACT),
	("*", Opcode::MULTIPLY),
	("/", Opcode::DIV),
	("divmod", Opcode::DIVMOD),
	(">", Opcode::GR),
	("ash", Opcode::ASH),
	("lsh", Opcode::LSH),
	("logand", Opcode::LOGAND),
	("logior", Opcode::LOGIOR),
	("logxor", Opcode::LOGXOR),
	("lognot", Opcode::LOGNOT),
	("point_add", Opcode::POINT_ADD),
	("pubkey_for_exp", Opcode::PUBKEY_FOR_EXP),
	("not", Opcode::NOT),
	("any", Opcode::ANY),
	("all", Opcode::ALL),
	("softfork", Opcode::SOFTFORK),
];

impl Opcode {
	#[inline]
	pub const fn as_u8(&self) -> u8 {
		self.0
	}

	#[inline]
	pub const fn as_usize(&self) -> usize {
		self.0 as usize
	}

	/// The operator atom for this opcode.
	pub fn as_atom(&self) -> [u8; 1] {
		[self.0]
	}

	pub fn keyword(&self) -> Option<&'static str> {
		KEYWORDS
			.iter()
			.find(|(_, opcode)| opcode == self)
			.map(|(keyword, _)| *keyword)
	}

	pub fn from_keyword(keyword: &str) -> Option<Opcode> {
		KEYWORDS
			.iter()
			.find(|(k, _)| *k == keyword)
			.map(|(_, opcode)| *opcode)
	}
}

/// Operator atom for a keyword such as `"sha256"`.
pub fn keyword_to_atom(keyword: &str) -> Option<Vec<u8>> {
	Opcode::from_keyword(keyword).map(|opcode| opcode.as_atom().to_vec())
}

/// Keyword for an operator atom. Only single byte atoms have one.
pub fn atom_to_keyword(atom: &[u8]) -> Option<&'static str> {
	match atom {
		[byte] => Opcode(*byte).keyword(),
		_ => None,
	}
}
