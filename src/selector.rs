/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Flashquiz.
 *
 * Flashquiz is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Flashquiz is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Flashquiz.  If not, see <http://www.gnu.org/licenses/>.
 */

use rand::Rng;

use crate::{deck::Flashcard, scores::Tallies};

///Index list which can only be accessed randomly, each index drawn
///proportionally to its weight.
pub(crate) struct WeightedList {
    weights: Vec<u64>,
    total_weight: u64,
}

impl WeightedList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            weights: Vec::with_capacity(capacity),
            total_weight: 0,
        }
    }

    pub fn add(&mut self, weight: u64) {
        assert!(weight > 0, "item weight must be greater than zero");

        self.weights.push(weight);
        self.total_weight += weight;
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn random_index<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        match self.len() {
            0 => None,
            1 => Some(0),
            _ => {
                let needle = rng.gen_range(0..self.total_weight);
                let mut running_total = 0;

                for (i, weight) in self.weights.iter().enumerate() {
                    running_total += *weight;
                    if needle < running_total {
                        return Some(i);
                    }
                }

                unreachable!("needle is always below the total weight")
            }
        }
    }
}

impl FromIterator<u64> for WeightedList {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let iter = iter.into_iter();

        let mut list = {
            let (lower_bound, _) = iter.size_hint();
            Self::with_capacity(lower_bound)
        };

        for weight in iter {
            list.add(weight);
        }

        list
    }
}

///Selection weight of every card, in deck order. Cards without a tally
///count as never answered.
pub fn weights(cards: &[Flashcard], tallies: &Tallies) -> Vec<u64> {
    cards
        .iter()
        .map(|card| {
            tallies
                .get(&card.question)
                .copied()
                .unwrap_or_default()
                .weight()
        })
        .collect()
}

///Draws the index of the next card to ask. `None` only for an empty deck.
pub fn pick<R: Rng>(cards: &[Flashcard], tallies: &Tallies, rng: &mut R) -> Option<usize> {
    weights(cards, tallies)
        .into_iter()
        .collect::<WeightedList>()
        .random_index(rng)
}
