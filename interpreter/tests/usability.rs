use clvm_core::{node_from_bytes, node_to_bytes, EvalError, Node};
use clvm_interpreter::{
	keyword_to_atom, run_program, Machine, Opcode, OperatorTable, Reduction, Response,
	OPERATOR_LOOKUP,
};
use hex_literal::hex;

const PROGRAM: [u8; 11] = hex!("ff10ff01ffff018200af80");

fn op(keyword: &str) -> Node {
	Node::atom(keyword_to_atom(keyword).unwrap())
}

#[test]
fn run_serialized_program() {
	let program = node_from_bytes(&PROGRAM).unwrap();
	let env = node_from_bytes(&[0x19]).unwrap();
	let Reduction(cost, result) = run_program(&OPERATOR_LOOKUP, &program, &env, None).unwrap();
	assert_eq!(node_to_bytes(&result).unwrap(), hex!("8200c8"));
	assert_eq!(cost, 833);
}

#[test]
fn program_built_from_keywords() {
	// (sha256 (q . "abc"))
	let program = Node::list(vec![op("sha256"), Node::pair(op("q"), Node::from("abc"))]);
	let Reduction(_, digest) = run_program(&OPERATOR_LOOKUP, &program, &Node::nil(), None).unwrap();
	assert_eq!(
		digest.atom_bytes().unwrap(),
		&hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
	);
}

#[test]
fn custom_primitive() {
	fn double(args: &Node) -> Response {
		let v = args.first()?.as_bigint().ok_or_else(|| EvalError::new("double on list", args))?;
		Ok(Reduction(1, Node::from(v * 2)))
	}

	let mut table = OperatorTable::standard();
	table.set(Opcode(0x30), double);
	let program = Node::list(vec![Node::from([0x30]), Node::pair(op("q"), Node::from(21))]);
	let Reduction(cost, result) = run_program(&table, &program, &Node::nil(), None).unwrap();
	assert_eq!(result, Node::from(42));
	assert_eq!(cost, 1 + 20 + 1);
}

#[test]
fn tables_and_trees_are_shared_across_threads() {
	let program = node_from_bytes(&PROGRAM).unwrap();
	let handles: Vec<_> = (0..4)
		.map(|i| {
			let program = program.clone();
			std::thread::spawn(move || {
				run_program(&OPERATOR_LOOKUP, &program, &Node::from(i), None).unwrap()
			})
		})
		.collect();
	for (i, handle) in handles.into_iter().enumerate() {
		let Reduction(_, result) = handle.join().unwrap();
		assert_eq!(result, Node::from(175 + i));
	}
}

#[test]
fn cost_is_deterministic() {
	let program = node_from_bytes(&PROGRAM).unwrap();
	let env = Node::from(25);
	let first = run_program(&OPERATOR_LOOKUP, &program, &env, Some(10_000)).unwrap();
	let second = run_program(&OPERATOR_LOOKUP, &program, &env, Some(10_000)).unwrap();
	assert_eq!(first, second);
}

#[test]
fn machine_stops_at_the_limit() {
	let program = node_from_bytes(&PROGRAM).unwrap();
	let mut machine = Machine::new(&OPERATOR_LOOKUP, program, Node::from(25), Some(100));
	let mut result = Ok(());
	while !machine.is_finished() && result.is_ok() {
		result = machine.step();
	}
	assert_eq!(result, Err(EvalError::CostExceeded { max_cost: 100 }));
	assert_eq!(machine.gasometer().remaining(), Some(0));
}
