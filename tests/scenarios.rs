use clvm::{
	node_from_bytes, node_to_bytes, run_serialized, run_with_config, Config, Error, EvalError,
	Node, Opcode, Reduction,
};
use hex_literal::hex;
use sha2::{Digest, Sha256};

const PROGRAM: [u8; 11] = hex!("ff10ff01ffff018200af80");

fn q(v: Node) -> Node {
	Node::pair(Node::from(Opcode::QUOTE.as_atom()), v)
}

fn plus_one_175() -> Node {
	Node::list(vec![
		Node::from(Opcode::ADD.as_atom()),
		Node::from(1),
		q(Node::from(175)),
	])
}

#[test]
fn program_encoding() {
	assert_eq!(node_to_bytes(&plus_one_175()).unwrap(), PROGRAM.to_vec());
	assert_eq!(node_from_bytes(&PROGRAM).unwrap(), plus_one_175());
}

#[test]
fn program_result() {
	let Reduction(cost, result) =
		run_with_config(&Config::default(), &plus_one_175(), &Node::from(25)).unwrap();
	assert_eq!(result, Node::from(200));
	assert_eq!(cost, 833);

	let Reduction(cost, result) = run_serialized(&Config::mainnet(), &PROGRAM, &[0x19]).unwrap();
	assert_eq!(node_to_bytes(&result).unwrap(), hex!("8200c8"));
	assert_eq!(cost, 833);
}

#[test]
fn one_below_the_cost_fails() {
	let Reduction(cost, _) =
		run_with_config(&Config::default(), &plus_one_175(), &Node::from(25)).unwrap();
	let config = Config::default().with_max_cost(Some(cost - 1));
	let err = run_with_config(&config, &plus_one_175(), &Node::from(25)).unwrap_err();
	assert_eq!(err, EvalError::CostExceeded { max_cost: cost - 1 });

	let config = Config::default().with_max_cost(Some(cost));
	assert!(run_with_config(&config, &plus_one_175(), &Node::from(25)).is_ok());
}

#[test]
fn empty_atom_and_zero_byte() {
	let nil = node_from_bytes(&[0x80]).unwrap();
	assert!(nil.nullp());
	assert_eq!(node_to_bytes(&nil).unwrap(), vec![0x80]);

	let zero = node_from_bytes(&[0x00]).unwrap();
	assert_eq!(zero.atom_bytes().unwrap(), &[0x00]);
	assert!(!zero.nullp());
	assert_ne!(zero, nil);
}

#[test]
fn reserved_prefix_always_fails() {
	for operator in [&[0xff, 0xff][..], &[0xff, 0xff, 0x00][..], &[0xff, 0xff, 0x12, 0x34][..]] {
		for args in [vec![], vec![q(Node::from(1))], vec![q(Node::from(1)), q(Node::from("x"))]] {
			let mut items = vec![Node::atom(operator)];
			items.extend(args);
			let program = Node::list(items);
			let err = run_with_config(&Config::default(), &program, &Node::nil()).unwrap_err();
			assert!(
				matches!(err, EvalError::ReservedOperator { .. }),
				"{:02x?}: {}",
				operator,
				err
			);
		}
	}
}

#[test]
fn sha256_matches_reference_digest() {
	for input in [&b""[..], &b"abc"[..], &[0x55; 100][..]] {
		let program = Node::list(vec![Node::from(Opcode::SHA256.as_atom()), q(Node::atom(input))]);
		let Reduction(cost, digest) =
			run_with_config(&Config::default(), &program, &Node::nil()).unwrap();
		assert_eq!(digest.atom_bytes().unwrap(), &Sha256::digest(input)[..]);
		// one evaluation step and the quote, then the operator itself
		assert_eq!(cost, 1 + 20 + 87 + 134 + 2 * input.len() as u64);
	}
}

#[test]
fn serialized_inputs_may_carry_trailing_bytes() {
	let mut program = PROGRAM.to_vec();
	program.extend_from_slice(&[0xde, 0xad]);
	let Reduction(_, result) = run_serialized(&Config::default(), &program, &[0x19, 0x00]).unwrap();
	assert_eq!(result, Node::from(200));

	let err = run_serialized(&Config::default(), &PROGRAM[..5], &[0x19]).unwrap_err();
	assert!(matches!(err, Error::Serialization(_)));
}

#[test]
fn runs_are_deterministic() {
	let program = node_from_bytes(&PROGRAM).unwrap();
	let env = Node::from(25);
	let first = run_with_config(&Config::mainnet(), &program, &env).unwrap();
	for _ in 0..10 {
		let again = run_with_config(&Config::mainnet(), &program, &env).unwrap();
		assert_eq!(again.0, first.0);
		assert_eq!(again.1, first.1);
	}
}
