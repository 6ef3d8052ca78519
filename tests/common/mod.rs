#![allow(dead_code)]

use flowopt::{Arc, Capacity, Network, Node, Process, Sink, SolveResult, Supply};

pub const TOLERANCE: f64 = 1e-6;

/// Ready-made networks shared by the integration tests
pub struct Scenarios;

impl Scenarios {
    /// Supply(10) → Sink(unbounded) through one arc of capacity 6
    pub fn single_arc() -> Network {
        Network::new(
            vec![
                Node::supply("src", Supply::new(Capacity::limited(10.0))),
                Node::sink("snk", Sink::new(Capacity::Unlimited)),
            ],
            vec![Arc::new("e1", "src", "snk").with_capacity(Capacity::limited(6.0))],
        )
    }

    /// Supply(10, cost 1) → Process(0.5) → Sink(demand 4, revenue 5)
    pub fn conversion_chain() -> Network {
        Network::new(
            vec![
                Node::supply("farm", Supply::new(Capacity::limited(10.0)).with_unit_cost(1.0)),
                Node::process("mill", Process::new(0.5)),
                Node::sink("bakery", Sink::new(Capacity::limited(4.0)).with_unit_revenue(5.0)),
            ],
            vec![
                Arc::new("wheat", "farm", "mill"),
                Arc::new("flour", "mill", "bakery"),
            ],
        )
    }

    /// Supply 100 at cost 1, demand 50 at value 10
    pub fn simple_source_sink() -> Network {
        Network::new(
            vec![
                Node::supply("src", Supply::new(Capacity::limited(100.0)).with_unit_cost(1.0)),
                Node::sink("snk", Sink::new(Capacity::limited(50.0)).with_unit_revenue(10.0)),
            ],
            vec![Arc::new("e1", "src", "snk")],
        )
    }

    /// Profitable path squeezed through an arc of capacity 7
    pub fn bottleneck_arc() -> Network {
        Network::new(
            vec![
                Node::supply("src", Supply::new(Capacity::limited(100.0))),
                Node::process("hub", Process::new(1.0)),
                Node::sink("snk", Sink::new(Capacity::Unlimited).with_unit_revenue(2.0)),
            ],
            vec![
                Arc::new("e_in", "src", "hub").with_capacity(Capacity::limited(7.0)),
                Arc::new("e_out", "hub", "snk"),
            ],
        )
    }

    /// Process limited to 3 units of intake
    pub fn process_with_capacity() -> Network {
        Network::new(
            vec![
                Node::supply("src", Supply::new(Capacity::limited(100.0)).with_unit_cost(1.0)),
                Node::process(
                    "p",
                    Process::new(1.0)
                        .with_unit_cost(1.0)
                        .with_capacity(Capacity::limited(3.0)),
                ),
                Node::sink("snk", Sink::new(Capacity::limited(10.0)).with_unit_revenue(10.0)),
            ],
            vec![Arc::new("e_in", "src", "p"), Arc::new("e_out", "p", "snk")],
        )
    }

    /// Processes and sinks but nothing feeding them
    pub fn without_supply() -> Network {
        Network::new(
            vec![
                Node::process("p", Process::new(2.0).with_unit_cost(1.0)),
                Node::sink("snk", Sink::new(Capacity::limited(5.0)).with_unit_revenue(3.0)),
            ],
            vec![Arc::new("out", "p", "snk").with_capacity(Capacity::limited(4.0))],
        )
    }

    /// Firm demand of 6 behind a 2:1 loss, with only 10 units of supply
    pub fn demand_beyond_supply() -> Network {
        Network::new(
            vec![
                Node::supply("farm", Supply::new(Capacity::limited(10.0))),
                Node::process("mill", Process::new(0.5)),
                Node::sink(
                    "bakery",
                    Sink::new(Capacity::Unlimited)
                        .with_required(6.0)
                        .with_unit_revenue(1.0),
                ),
            ],
            vec![
                Arc::new("wheat", "farm", "mill"),
                Arc::new("flour", "mill", "bakery"),
            ],
        )
    }

    /// Nothing limits the flow from the supply to the sink
    pub fn unlimited_path() -> Network {
        Network::new(
            vec![
                Node::supply("well", Supply::new(Capacity::Unlimited)),
                Node::sink("sea", Sink::new(Capacity::Unlimited).with_unit_revenue(1.0)),
            ],
            vec![Arc::new("river", "well", "sea")],
        )
    }

    /// Two processes doubling each other's output around a cycle
    pub fn amplifying_cycle() -> Network {
        Network::new(
            vec![
                Node::process("a", Process::new(2.0)),
                Node::process("b", Process::new(2.0)),
                Node::sink("out", Sink::new(Capacity::Unlimited).with_unit_revenue(1.0)),
            ],
            vec![
                Arc::new("ab", "a", "b"),
                Arc::new("ba", "b", "a"),
                Arc::new("b_out", "b", "out"),
            ],
        )
    }

    /// Two sources, two mills, two markets with mixed prices and limits
    pub fn regional_grid() -> Network {
        Network::new(
            vec![
                Node::supply("north", Supply::new(Capacity::limited(40.0)).with_unit_cost(2.0)),
                Node::supply("south", Supply::new(Capacity::limited(25.0)).with_unit_cost(1.0)),
                Node::process(
                    "mill_a",
                    Process::new(0.8)
                        .with_unit_cost(0.5)
                        .with_capacity(Capacity::limited(30.0)),
                ),
                Node::process("mill_b", Process::new(0.6).with_unit_cost(0.2)),
                Node::sink(
                    "city",
                    Sink::new(Capacity::limited(20.0)).with_unit_revenue(9.0),
                ),
                Node::sink(
                    "export",
                    Sink::new(Capacity::Unlimited)
                        .with_unit_revenue(4.0)
                        .with_required(2.0),
                ),
            ],
            vec![
                Arc::new("n_a", "north", "mill_a").with_capacity(Capacity::limited(35.0)),
                Arc::new("n_b", "north", "mill_b").with_unit_cost(0.5),
                Arc::new("s_a", "south", "mill_a").with_unit_cost(0.3),
                Arc::new("s_b", "south", "mill_b").with_capacity(Capacity::limited(10.0)),
                Arc::new("a_city", "mill_a", "city").with_capacity(Capacity::limited(15.0)),
                Arc::new("a_export", "mill_a", "export"),
                Arc::new("b_city", "mill_b", "city").with_unit_cost(1.0),
                Arc::new("b_export", "mill_b", "export"),
            ],
        )
    }
}

/// Flow invariants every optimal result has to satisfy
pub fn assert_flow_invariants(network: &Network, result: &SolveResult) {
    for arc in network.arcs() {
        let flow = result
            .flow(&arc.id)
            .unwrap_or_else(|| panic!("no flow reported for arc '{}'", arc.id));
        assert!(flow >= 0.0, "arc '{}' has negative flow {}", arc.id, flow);
        if let Some(limit) = arc.capacity.limit() {
            assert!(
                flow <= limit + TOLERANCE,
                "arc '{}' carries {} over its capacity {}",
                arc.id,
                flow,
                limit
            );
        }
    }

    for (id, run) in &result.process_runs {
        assert!(*run >= 0.0, "process '{}' has negative run {}", id, run);
    }

    for (id, (inflow, outflow)) in flowopt::application::process_balances(network, result) {
        let ratio = match network.find_node(&id).map(|(_, node)| &node.kind) {
            Some(flowopt::NodeKind::Process(process)) => process.ratio,
            other => panic!("'{}' is not a process: {:?}", id, other),
        };
        assert!(
            (outflow - ratio * inflow).abs() <= TOLERANCE,
            "process '{}' breaks conservation: in {} out {} ratio {}",
            id,
            inflow,
            outflow,
            ratio
        );
        let run = result.process_run(&id).unwrap_or_default();
        assert!((run - inflow).abs() <= TOLERANCE, "process '{}' run {} != intake {}", id, run, inflow);
    }
}
